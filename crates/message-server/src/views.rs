//! HTML pages served to operators.
//!
//! Pages are plain `format!` templates; every value that came from a request
//! or from storage goes through [`html_escape`] first.

use domain::DeviceRecord;

const PAGE_STYLE: &str = r#"
      body { font-family: Arial; background: #0d1117; color: #c9d1d9; text-align: center; margin-top: 40px; }
      form { background: #161b22; padding: 20px; border-radius: 10px; width: 320px; margin: auto; }
      input, button { padding: 10px; margin: 5px; border-radius: 5px; border: none; width: 90%; }
      button { background: #238636; color: white; cursor: pointer; }
      ul { list-style: none; padding: 0; margin-top: 20px; }
      a { color: #58a6ff; }"#;

/// Control panel: update form plus every known device id
pub fn control_panel(ids: &[String]) -> String {
    let list = if ids.is_empty() {
        "<li>No devices yet</li>".to_string()
    } else {
        ids.iter()
            .map(|id| format!("<li>{}</li>", html_escape(id)))
            .collect::<String>()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Multi-Device Control</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{style}
    </style>
  </head>
  <body>
    <h1>🧠 Multi-Device Control</h1>
    <form action="/message" method="POST">
      <input type="text" name="id" placeholder="Device ID (e.g. device1)" required><br>
      <input type="text" name="message" placeholder="Message (e.g. 0741842196 100)" required><br>
      <button type="submit">Update Message</button>
    </form>
    <h3>📋 Active Devices</h3>
    <ul>{list}</ul>
  </body>
</html>"#,
        style = PAGE_STYLE,
        list = list,
    )
}

/// Confirmation fragment echoing an accepted update
pub fn update_confirmation(record: &DeviceRecord) -> String {
    format!(
        r#"<html>
  <head><style>{style}
  </style></head>
  <body style="margin-top:100px;">
    <h2>✅ Message Updated for {id}</h2>
    <p><b>{message}</b></p>
    <a href="/">Go Back</a>
  </body>
</html>"#,
        style = PAGE_STYLE,
        id = html_escape(record.id.as_str()),
        message = html_escape(record.message.as_str()),
    )
}

/// escape html special characters to prevent xss
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
