//! vCard encoding at three fidelity tiers.

use super::data::VCardData;
use super::fold::fold_line;
use super::sanitize::{escape_param, sanitize};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type of every encoded card.
pub const VCARD_MIME_TYPE: &str = "text/vcard";

const CRLF: &str = "\r\n";

/// Fidelity tier, chosen by the caller from its view context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Name, one phone, one email.
    Minimal,
    /// Adds organization, title, a one-line address and links to the website
    /// and public profile. For mobile views.
    Simple,
    /// Everything, with folding and an embedded photo. For desktop views.
    Full,
}

impl Tier {
    /// Lowercase tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Minimal => "minimal",
            Tier::Simple => "simple",
            Tier::Full => "full",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded record plus what the delivery layer needs to ship it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCard {
    /// CRLF-terminated record text
    pub text: String,

    /// Suggested download name, `{firstName}_{lastName}.vcf`
    pub file_name: String,

    /// Always [`VCARD_MIME_TYPE`]
    pub mime_type: &'static str,

    /// Full name, used as the share-sheet title
    pub display_name: String,

    /// Whether the source profile had a first or last name
    pub named: bool,
}

impl EncodedCard {
    /// Record bytes (UTF-8).
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Accumulates content lines, folding them when asked to.
struct RecordWriter {
    out: String,
    fold: bool,
}

impl RecordWriter {
    fn new(fold: bool) -> Self {
        Self {
            out: String::with_capacity(512),
            fold,
        }
    }

    fn line(&mut self, content: &str) {
        if self.fold {
            self.out.push_str(&fold_line(content));
        } else {
            self.out.push_str(content);
        }
        self.out.push_str(CRLF);
    }

    fn property(&mut self, name_and_params: &str, raw_value: &str) {
        self.line(&format!("{}:{}", name_and_params, sanitize(raw_value)));
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Build `{first}_{last}.vcf`, keeping path separators out of the name.
pub fn file_name_for(first_name: &str, last_name: &str) -> String {
    let clean = |part: &str| part.trim().replace(['/', '\\'], "_");
    let (first, last) = (clean(first_name), clean(last_name));
    if first.is_empty() && last.is_empty() {
        return "contact.vcf".to_string();
    }
    format!("{}_{}.vcf", first, last)
}

/// Encode a card at the given tier.
///
/// Never fails: a record with no contact fields still carries the begin
/// block, both name lines and the end marker.
pub fn encode(data: &VCardData, tier: Tier) -> EncodedCard {
    let mut w = RecordWriter::new(tier == Tier::Full);

    w.line("BEGIN:VCARD");
    w.line("VERSION:3.0");
    w.line(&format!(
        "N:{};{};;;",
        sanitize(&data.last_name),
        sanitize(&data.first_name)
    ));
    w.property("FN", &data.full_name());

    if tier != Tier::Minimal {
        if let Some(org) = &data.organization {
            w.property("ORG", org);
        }
        if let Some(title) = &data.title {
            w.property("TITLE", title);
        }
    }

    if tier == Tier::Full {
        if let Some(photo) = data.photo.as_ref().filter(|p| !p.bytes.is_empty()) {
            let params = match photo.type_param() {
                Some(kind) => format!("PHOTO;ENCODING=b;TYPE={}", escape_param(&kind)),
                None => "PHOTO;ENCODING=b".to_string(),
            };
            w.line(&format!("{}:{}", params, STANDARD.encode(&photo.bytes)));
        }
    }

    if let Some(phone) = &data.phone {
        w.property("TEL;TYPE=CELL", phone);
    }
    if let Some(email) = &data.email {
        w.property("EMAIL;TYPE=INTERNET", email);
    }

    match tier {
        Tier::Minimal => {}
        Tier::Simple => {
            if !data.address.is_empty() {
                w.line(&format!(
                    "ADR;TYPE=WORK:;;{};;;;",
                    sanitize(&data.address.single_line())
                ));
            }
        }
        Tier::Full => {
            if !data.address.is_empty() {
                let component = |c: &Option<String>| sanitize(c.as_deref().unwrap_or_default());
                let a = &data.address;
                w.line(&format!(
                    "ADR;TYPE=WORK:;;{};{};{};{};{}",
                    component(&a.street),
                    component(&a.city),
                    component(&a.state),
                    component(&a.postal_code),
                    component(&a.country),
                ));
            }
        }
    }

    if tier != Tier::Minimal {
        if let Some(website) = &data.website {
            w.property("URL", website);
        }
        if let Some(profile_url) = &data.profile_url {
            w.property("URL;TYPE=profile", profile_url);
        }
    }

    if tier == Tier::Full {
        if let Some(link) = data.whatsapp.as_deref().and_then(whatsapp_link) {
            w.property("URL;TYPE=whatsapp", &link);
        }
        for social in &data.social {
            w.property(&format!("URL;TYPE={}", escape_param(&social.label)), &social.url);
        }
        if let Some(note) = &data.note {
            w.property("NOTE", note);
        }
    }

    w.line("END:VCARD");

    EncodedCard {
        text: w.finish(),
        file_name: file_name_for(&data.first_name, &data.last_name),
        mime_type: VCARD_MIME_TYPE,
        display_name: data.full_name(),
        named: !(data.first_name.is_empty() && data.last_name.is_empty()),
    }
}

/// `https://wa.me/{digits}`, or `None` when the number has no digits.
fn whatsapp_link(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("https://wa.me/{}", digits))
}
