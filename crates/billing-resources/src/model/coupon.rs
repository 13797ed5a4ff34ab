use resource_framework::error::Result;
use resource_framework::kind::require;
use resource_framework::{Fields, ResourceDescriptor, ResourceKind, WriteAction};

pub static COUPON: ResourceDescriptor = ResourceDescriptor::new(
    &[
        "coupon_code",
        "name",
        "description",
        "discount_type",
        "discount_percent",
        "discount_in_cents",
        "redeem_by_date",
        "max_redemptions",
        "applies_to_all_plans",
        "plan_codes",
    ],
    "coupon_code",
    "coupon",
    "coupons",
    false,
);

pub struct Coupon;

impl ResourceKind for Coupon {
    fn descriptor() -> &'static ResourceDescriptor {
        &COUPON
    }

    fn validate(action: WriteAction, options: &Fields) -> Result<()> {
        if action != WriteAction::Create {
            return Ok(());
        }
        require(options, "coupon_code", || {
            "coupon must include \"coupon_code\"".to_string()
        })?;
        require(options, "name", || "coupon must include \"name\"".to_string())
    }
}
