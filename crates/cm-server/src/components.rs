//! HTML component examples built from semantic class names.

use cm_minify::MinificationMap;

/// Template names, in listing order.
pub const COMPONENT_NAMES: [&str; 10] = [
    "button-group",
    "card-with-header",
    "form-field",
    "alert-with-icon",
    "avatar-stack",
    "modal",
    "table",
    "nav-bar",
    "pricing-card",
    "testimonial",
];

const BUTTON_GROUP: &str = r#"<div class="flex-start space-x-2">
  <button class="btn-primary">Save</button>
  <button class="btn-secondary">Cancel</button>
  <button class="btn-danger">Delete</button>
</div>"#;

const CARD_WITH_HEADER: &str = r#"<div class="card">
  <div class="card-header">
    <h3 class="heading-sm">Card Title</h3>
    <button class="btn-ghost">Edit</button>
  </div>
  <div class="card-body">
    <p class="text-body">Card content goes here...</p>
  </div>
  <div class="card-footer">
    <span class="text-muted">Last updated: Today</span>
    <button class="btn-primary">View Details</button>
  </div>
</div>"#;

const FORM_FIELD: &str = r#"<div class="stack">
  <label class="label">Email Address</label>
  <input type="email" class="input" placeholder="you@example.com" />
  <p class="helper-text">We'll never share your email.</p>
</div>"#;

const ALERT_WITH_ICON: &str = r#"<div class="alert-success">
  <div class="flex-start">
    <span>✓</span>
    <div>
      <p class="heading-sm">Success!</p>
      <p class="text-body">Your changes have been saved.</p>
    </div>
  </div>
</div>"#;

const AVATAR_STACK: &str = r#"<div class="flex">
  <div class="avatar-md">AB</div>
  <div class="avatar-md">CD</div>
  <div class="avatar-md">EF</div>
  <div class="avatar-md">+5</div>
</div>"#;

const MODAL: &str = r#"<!-- SSR Warning: Control visibility with server state -->
<div class="modal-overlay"></div>
<div class="modal">
  <div class="modal-header">
    <h2 class="heading-sm">Confirm Action</h2>
    <button class="btn-ghost">×</button>
  </div>
  <div class="modal-body">
    <p class="text-body">Are you sure you want to proceed?</p>
  </div>
  <div class="modal-footer">
    <button class="btn-secondary">Cancel</button>
    <button class="btn-primary">Confirm</button>
  </div>
</div>"#;

const TABLE: &str = r#"<table class="table">
  <thead class="table-header">
    <tr>
      <th class="th">Name</th>
      <th class="th">Status</th>
      <th class="th">Actions</th>
    </tr>
  </thead>
  <tbody>
    <tr class="tr-hover">
      <td class="td">John Doe</td>
      <td class="td"><span class="badge-success">Active</span></td>
      <td class="td"><button class="btn-ghost">Edit</button></td>
    </tr>
  </tbody>
</table>"#;

const NAV_BAR: &str = r##"<nav class="nav">
  <div class="container flex-between">
    <div class="flex-start">
      <a href="/" class="heading-sm">Logo</a>
      <div class="flex-start">
        <a href="#" class="nav-link-active">Home</a>
        <a href="#" class="nav-link">Features</a>
        <a href="#" class="nav-link">Pricing</a>
      </div>
    </div>
    <div class="flex-start">
      <a href="#" class="nav-link">Sign in</a>
      <button class="btn-primary">Get Started</button>
    </div>
  </div>
</nav>"##;

const PRICING_CARD: &str = r#"<div class="card">
  <div class="card-header">
    <span class="badge-primary">Popular</span>
  </div>
  <div class="card-body">
    <h3 class="heading-md">Pro Plan</h3>
    <p class="heading-xl">$29<span class="text-muted">/mo</span></p>
    <ul class="list">
      <li class="list-item">Unlimited projects</li>
      <li class="list-item">Priority support</li>
      <li class="list-item">Advanced analytics</li>
    </ul>
  </div>
  <div class="card-footer">
    <button class="btn-primary">Get Started</button>
  </div>
</div>"#;

const TESTIMONIAL: &str = r#"<div class="card">
  <div class="card-body">
    <p class="text-body">"This product changed how we work. Highly recommended!"</p>
  </div>
  <div class="card-footer">
    <div class="flex-start">
      <div class="avatar-md">JD</div>
      <div>
        <p class="heading-sm">Jane Doe</p>
        <p class="text-muted">CEO, TechCorp</p>
      </div>
    </div>
  </div>
</div>"#;

/// Returns the markup of a named template.
#[must_use]
pub fn component(name: &str) -> Option<&'static str> {
    let html = match name {
        "button-group" => BUTTON_GROUP,
        "card-with-header" => CARD_WITH_HEADER,
        "form-field" => FORM_FIELD,
        "alert-with-icon" => ALERT_WITH_ICON,
        "avatar-stack" => AVATAR_STACK,
        "modal" => MODAL,
        "table" => TABLE,
        "nav-bar" => NAV_BAR,
        "pricing-card" => PRICING_CARD,
        "testimonial" => TESTIMONIAL,
        _ => return None,
    };
    Some(html)
}

/// Swaps semantic class names in `html` for their short names.
///
/// Only attribute values consisting of exactly one mapped name are replaced;
/// `class="flex-start space-x-2"` is left alone.
#[must_use]
pub fn minify_markup(html: &str, map: &MinificationMap) -> String {
    let mut out = html.to_owned();
    for (semantic, minified) in map.pairs() {
        let quoted = format!("\"{semantic}\"");
        if out.contains(&quoted) {
            out = out.replace(&quoted, &format!("\"{minified}\""));
        }
    }
    out
}
