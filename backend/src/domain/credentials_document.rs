//! Plain-text credentials handout.

use super::ProvisionedAccount;

const HEADER: &str = "AWS WORKSHOP CREDENTIALS";
const RULE: &str = "------------------------";

/// Rendered credentials file for a provisioned account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsDocument {
    file_name: String,
    contents: String,
}

impl CredentialsDocument {
    /// Render the handout for `account`.
    ///
    /// # Examples
    /// ```
    /// use workshop_iam::domain::{
    ///     CredentialsDocument, ProvisionedAccount, Username, CONSOLE_URL,
    /// };
    ///
    /// let account = ProvisionedAccount {
    ///     username: Username::new("alice").expect("valid username"),
    ///     password: "alice@encode2025".to_owned(),
    ///     arn: "arn:aws:iam::123456789012:user/alice".to_owned(),
    ///     console_url: CONSOLE_URL.to_owned(),
    ///     signin_url: None,
    /// };
    /// let document = CredentialsDocument::render(&account);
    /// assert_eq!(document.file_name(), "alice_credentials.txt");
    /// assert!(document.contents().contains("Password: alice@encode2025"));
    /// ```
    pub fn render(account: &ProvisionedAccount) -> Self {
        Self {
            file_name: credentials_file_name(account),
            contents: format_credentials(account),
        }
    }

    /// Download file name, `{username}_credentials.txt`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Text body of the handout.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Name offered for the downloaded handout.
pub fn credentials_file_name(account: &ProvisionedAccount) -> String {
    format!("{}_credentials.txt", account.username)
}

/// Render the fixed-layout handout text.
pub fn format_credentials(account: &ProvisionedAccount) -> String {
    let mut lines = vec![
        HEADER.to_owned(),
        RULE.to_owned(),
        format!("Username: {}", account.username),
        format!("Password: {}", account.password),
        format!("ARN: {}", account.arn),
    ];
    if let Some(signin_url) = &account.signin_url {
        lines.push(format!("Sign-in Link: {signin_url}"));
    }
    lines.push(format!("Console URL: {}", account.console_url));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
