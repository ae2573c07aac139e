pub mod trust_asset_modal;
pub mod make_payment_modal;
pub mod enter_pincode_modal;

pub use trust_asset_modal::TrustAssetModal;
pub use make_payment_modal::MakePaymentModal;
pub use enter_pincode_modal::EnterPincodeModal;
