use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ReceiptFormat;
use crate::error::Result;
use crate::models::Receipt;
use crate::receipt::integrity::to_canonical_json;

/// What happened while writing a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Whether the file was restricted to owner read/write.
    pub restricted: bool,
    /// Set when restricting permissions failed; the receipt is still written.
    pub permission_warning: Option<String>,
}

/// Human-readable receipt body.
pub fn render_text(receipt: &Receipt) -> String {
    let extras = if receipt.extras.is_empty() {
        "inga".to_string()
    } else {
        receipt.extras.join(", ")
    };

    format!(
        "Salladsbaren - kvitto\n\
         Sallad: {} ({} kr)\n\
         Extra ingredienser: {}\n\
         Totalpris: {} kr\n",
        receipt.salad, receipt.salad_price, extras, receipt.total
    )
}

/// Write a receipt, overwriting whatever is at `path`.
///
/// The signed format hashes the receipt first and then restricts the file to
/// owner read/write. A failed permission change is logged and reported, not
/// returned as an error.
pub fn write_receipt<P: AsRef<Path>>(
    path: P,
    receipt: &Receipt,
    format: ReceiptFormat,
) -> Result<WriteReport> {
    let path = path.as_ref();

    match format {
        ReceiptFormat::Text => {
            fs::write(path, render_text(receipt))?;
            info!(path = %path.display(), "text receipt written");
            Ok(WriteReport {
                restricted: false,
                permission_warning: None,
            })
        }
        ReceiptFormat::Signed => {
            let signed = receipt.clone().sign()?;
            let mut json = to_canonical_json(&signed)?;
            json.push('\n');
            fs::write(path, json)?;
            info!(path = %path.display(), "signed receipt written");

            Ok(permission_report(path, restrict_to_owner(path)))
        }
    }
}

/// A failed restriction is logged once here and carried in the report.
fn permission_report(path: &Path, restricted: std::io::Result<()>) -> WriteReport {
    match restricted {
        Ok(()) => WriteReport {
            restricted: true,
            permission_warning: None,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not restrict receipt permissions");
            WriteReport {
                restricted: false,
                permission_warning: Some(e.to_string()),
            }
        }
    }
}

/// Read a signed receipt back. Verification is left to the caller.
pub fn read_receipt<P: AsRef<Path>>(path: P) -> Result<Receipt> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "owner-only permissions are only supported on unix",
    ))
}
