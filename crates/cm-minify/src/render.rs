//! CSS output for a minification map.

use std::fmt::Write as _;

use cm_core::{ClassSyntax, FrameworkId};

use crate::map::{MinificationMap, MinifiedClassEntry};

/// Options for [`render_css`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Framework whose class syntax selects the rule body.
    pub framework: FrameworkId,
    /// Emit a header and a `/* semantic-name */` line before each rule.
    pub include_comments: bool,
}

impl RenderOptions {
    /// Options for `framework` with comments enabled.
    #[must_use]
    pub const fn new(framework: FrameworkId) -> Self {
        Self {
            framework,
            include_comments: true,
        }
    }

    /// Sets whether comments are emitted.
    #[must_use]
    pub const fn with_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(FrameworkId::default())
    }
}

/// Renders one rule per entry, in insertion order.
///
/// Frameworks that support `@apply` get `.a { @apply …; }`; the rest get the
/// classes as a comment, `.a { /* … */ }`, since they have no way to compose
/// utilities in CSS.
///
/// # Examples
///
/// ```
/// use cm_core::FrameworkId;
/// use cm_minify::{MinificationMap, RenderOptions, render_css};
///
/// let mut map = MinificationMap::new();
/// map.minify("btn", "px-4 py-2");
///
/// let options = RenderOptions::new(FrameworkId::Tailwind).with_comments(false);
/// assert_eq!(render_css(&map, options), ".a { @apply px-4 py-2; }\n");
/// ```
#[must_use]
pub fn render_css(map: &MinificationMap, options: RenderOptions) -> String {
    let syntax = options.framework.class_syntax();
    let mut css = String::new();

    if options.include_comments {
        let _ = writeln!(css, "/* Minified classes - {} */", options.framework);
        css.push('\n');
    }
    for entry in map {
        if options.include_comments {
            let _ = writeln!(css, "/* {} */", comment_safe(&entry.original));
        }
        write_rule(&mut css, entry, syntax);
    }
    css
}

fn write_rule(css: &mut String, entry: &MinifiedClassEntry, syntax: ClassSyntax) {
    if syntax.supports_apply() {
        let _ = writeln!(css, ".{} {{ @apply {}; }}", entry.minified, entry.classes);
    } else {
        let _ = writeln!(css, ".{} {{ /* {} */ }}", entry.minified, comment_safe(&entry.classes));
    }
}

/// Keeps `*/` inside text from closing the surrounding CSS comment.
///
/// # Examples
///
/// ```
/// use cm_minify::comment_safe;
///
/// assert_eq!(comment_safe("p-4 */ .x {"), "p-4 * / .x {");
/// assert_eq!(comment_safe("p-4"), "p-4");
/// ```
#[must_use]
pub fn comment_safe(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains("*/") {
        text.replace("*/", "* /").into()
    } else {
        text.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_entries() -> MinificationMap {
        let mut map = MinificationMap::new();
        map.minify("btn-primary", "inline-flex px-4 py-2");
        map.minify("card", "rounded-lg p-6");
        map
    }

    #[test]
    fn test_apply_rules_in_insertion_order() {
        let css = render_css(
            &two_entries(),
            RenderOptions::new(FrameworkId::Tailwind).with_comments(false),
        );
        assert_eq!(
            css,
            ".a { @apply inline-flex px-4 py-2; }\n.b { @apply rounded-lg p-6; }\n"
        );
        assert!(!css.contains("badge"));
    }

    #[test]
    fn test_raw_rules() {
        let css = render_css(
            &two_entries(),
            RenderOptions::new(FrameworkId::Bootstrap).with_comments(false),
        );
        assert_eq!(
            css,
            ".a { /* inline-flex px-4 py-2 */ }\n.b { /* rounded-lg p-6 */ }\n"
        );
    }

    #[test]
    fn test_with_comments() {
        let css = render_css(&two_entries(), RenderOptions::new(FrameworkId::Unocss));
        insta::assert_snapshot!(css, @r"
        /* Minified classes - unocss */

        /* btn-primary */
        .a { @apply inline-flex px-4 py-2; }
        /* card */
        .b { @apply rounded-lg p-6; }
        ");
    }

    #[test]
    fn test_empty_map() {
        let map = MinificationMap::new();
        let options = RenderOptions::new(FrameworkId::Tachyons).with_comments(false);
        assert_eq!(render_css(&map, options), "");
    }

    #[test]
    fn test_comment_terminator_is_escaped() {
        let mut map = MinificationMap::new();
        map.minify("odd", "a */ b");
        let css = render_css(
            &map,
            RenderOptions::new(FrameworkId::Tachyons).with_comments(false),
        );
        assert_eq!(css, ".a { /* a * / b */ }\n");
    }
}
