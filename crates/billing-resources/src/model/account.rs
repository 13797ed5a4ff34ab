//! Customer account. Its code is chosen by the caller, so it is both the identity and a
//! writable property.

use resource_framework::error::Result;
use resource_framework::kind::require;
use resource_framework::{Fields, ResourceDescriptor, ResourceKind, WriteAction};

pub static ACCOUNT: ResourceDescriptor = ResourceDescriptor::new(
    &[
        "account_code",
        "username",
        "email",
        "first_name",
        "last_name",
        "company_name",
        "vat_number",
        "tax_exempt",
        "preferred_locale",
        "address",
        "billing_info",
    ],
    "account_code",
    "account",
    "accounts",
    false,
);

pub struct Account;

impl ResourceKind for Account {
    fn descriptor() -> &'static ResourceDescriptor {
        &ACCOUNT
    }

    fn validate(action: WriteAction, options: &Fields) -> Result<()> {
        match action {
            WriteAction::Create => require(options, "account_code", || {
                "account must include \"account_code\"".to_string()
            }),
            _ => Ok(()),
        }
    }
}
