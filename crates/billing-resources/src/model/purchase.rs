//! A purchase bundles an account with subscriptions and/or one-time adjustments into a
//! single invoice. It can also be previewed, which prices it without persisting anything.

use resource_framework::error::Result;
use resource_framework::kind::{is_present, require};
use resource_framework::{Fields, ResourceDescriptor, ResourceError, ResourceKind, WriteAction};

pub static PURCHASE: ResourceDescriptor = ResourceDescriptor::new(
    &[
        "account",
        "adjustments",
        "collection_method",
        "currency",
        "po_number",
        "net_terms",
        "gift_card",
        "coupon_codes",
        "subscriptions",
        "customer_notes",
        "terms_and_conditions",
        "vat_reverse_charge_notes",
        "shipping_address_id",
    ],
    "uuid",
    "purchase",
    "purchases",
    true,
);

/// `POST /purchases/preview`.
pub const PREVIEW: WriteAction = WriteAction::Custom("preview");

pub struct Purchase;

impl ResourceKind for Purchase {
    fn descriptor() -> &'static ResourceDescriptor {
        &PURCHASE
    }

    /// Create and preview share the same rules; only the label in the message differs.
    fn validate(action: WriteAction, options: &Fields) -> Result<()> {
        let label = match action {
            WriteAction::Create => "purchase",
            WriteAction::Custom(name) => name,
            WriteAction::Update => return Ok(()),
        };

        require(options, "account", || {
            format!("{label} must include \"account\" information")
        })?;
        if !is_present(options, "subscriptions") && !is_present(options, "adjustments") {
            return Err(ResourceError::validation(format!(
                "{label} must include either \"subscriptions\" or \"adjustments\""
            )));
        }
        if is_present(options, "adjustments") {
            require(options, "currency", || {
                format!("{label} must include \"currency\" parameter when \"adjustments\" exist")
            })?;
        }
        Ok(())
    }
}
