//! Server-rendered HTML for the provisioning form.
//!
//! One page serves every state: the empty form, validation and provisioning
//! errors, the created-account details and the download fallback. All
//! user-controlled text passes through [`escape_html`].

use crate::domain::{ProvisionedAccount, format_credentials};

const TITLE: &str = "AWS Workshop - IAM User Creator";
const SUBTITLE: &str = "This tool creates IAM users for workshop participants.";
const DOWNLOAD_WARNING: &str =
    "Please download the file now. The temporary file will be deleted after this session.";

/// What the page shows below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Just the form.
    Empty,
    /// Input was rejected before provisioning.
    Invalid(String),
    /// Provisioning failed; the message is shown after `Error: `.
    Failed(String),
    /// Account created.
    Created(ProvisionedAccount),
    /// The handout could not be staged; its text is shown inline instead.
    DownloadFailed {
        account: ProvisionedAccount,
        error: String,
    },
}

/// Escape text for HTML element content and quoted attribute values.
///
/// # Examples
/// ```
/// use workshop_iam::inbound::http::page::escape_html;
///
/// assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the full page for `outcome`.
pub fn render_page(outcome: &PageOutcome) -> String {
    let body = match outcome {
        PageOutcome::Empty => String::new(),
        PageOutcome::Invalid(message) => alert("error", message),
        PageOutcome::Failed(message) => alert("error", &format!("Error: {message}")),
        PageOutcome::Created(account) => created_section(account),
        PageOutcome::DownloadFailed { account, error } => format!(
            "{}\n{}",
            alert("error", &format!("Error creating temporary file: {error}")),
            code_block(&format_credentials(account)),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{TITLE}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 720px; margin: 40px auto; padding: 0 20px; color: #1a1a1a; }}
        .subtitle {{ color: #555; margin-bottom: 24px; }}
        form.create {{ border: 1px solid #ddd; border-radius: 8px; padding: 20px; margin-bottom: 24px; }}
        label {{ display: block; font-weight: 500; margin-bottom: 8px; }}
        input[type="text"] {{ width: 100%; padding: 8px 12px; font-size: 16px; box-sizing: border-box; margin-bottom: 12px; }}
        button {{ padding: 8px 16px; font-size: 16px; cursor: pointer; }}
        .alert {{ padding: 12px 16px; border-radius: 6px; margin: 16px 0; }}
        .alert.success {{ background: #e6f4ea; color: #1e4620; }}
        .alert.error {{ background: #fdecea; color: #611a15; }}
        .alert.warning {{ background: #fff4e5; color: #663c00; }}
        pre {{ background: #f5f5f5; padding: 12px 16px; border-radius: 6px; overflow-x: auto; }}
    </style>
</head>
<body>
    <h1>{TITLE}</h1>
    <p class="subtitle">{SUBTITLE}</p>
    <form class="create" method="post" action="/">
        <label for="username">Enter Username</label>
        <input id="username" name="username" type="text" autocomplete="off">
        <button type="submit">Create IAM User</button>
    </form>
{body}
    <hr>
</body>
</html>
"#
    )
}

fn alert(class: &str, message: &str) -> String {
    format!(
        r#"    <p class="alert {class}">{}</p>"#,
        escape_html(message)
    )
}

fn code_block(text: &str) -> String {
    format!(r#"    <pre><code>{}</code></pre>"#, escape_html(text))
}

fn hidden_field(name: &str, value: &str) -> String {
    format!(
        r#"        <input type="hidden" name="{name}" value="{}">"#,
        escape_html(value)
    )
}

fn created_section(account: &ProvisionedAccount) -> String {
    let username = account.username.as_ref();
    let mut details = vec![
        ("Username", username),
        ("Password", account.password.as_str()),
        ("ARN", account.arn.as_str()),
    ];
    if let Some(signin_url) = &account.signin_url {
        details.push(("Sign-in Link", signin_url.as_str()));
    }
    details.push(("Console URL", account.console_url.as_str()));

    let mut lines = vec![
        alert("success", &format!("User '{username}' created!")),
        "    <h3>User Details</h3>".to_owned(),
        "    <ul>".to_owned(),
    ];
    lines.extend(
        details
            .into_iter()
            .map(|(label, value)| format!("        <li>{label}: {}</li>", escape_html(value))),
    );
    lines.push("    </ul>".to_owned());

    lines.push(r#"    <form method="post" action="/credentials">"#.to_owned());
    lines.push(hidden_field("username", username));
    lines.push(hidden_field("password", &account.password));
    lines.push(hidden_field("arn", &account.arn));
    lines.push(hidden_field("console_url", &account.console_url));
    if let Some(signin_url) = &account.signin_url {
        lines.push(hidden_field("signin_url", signin_url.as_str()));
    }
    lines.push(r#"        <button type="submit">Download Credentials</button>"#.to_owned());
    lines.push("    </form>".to_owned());

    lines.push("    <h3>Alternative: Copy Text</h3>".to_owned());
    lines.push(code_block(&format_credentials(account)));
    lines.push(alert("warning", DOWNLOAD_WARNING));
    lines.join("\n")
}
