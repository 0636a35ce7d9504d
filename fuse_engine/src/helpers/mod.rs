mod merchant_signature;

pub use merchant_signature::{
    calculate_merchant_signature,
    signing_string,
    verify_merchant_signature,
    MerchantSignatureError,
};
