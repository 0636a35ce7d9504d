//! Handles the payment notifications the gateway posts back to the merchant once the customer has finished paying.

use std::fmt::Debug;

use log::*;

use crate::{
    fuse_api::errors::NotificationError,
    fuse_types::{
        param_keys,
        AuthResult,
        NotificationParameters,
        ProcessPaymentModel,
        ProcessPaymentResponseModel,
        SignedFieldSpec,
    },
    helpers::verify_merchant_signature,
    traits::LedgerManagement,
};

pub struct NotificationApi<L> {
    ledger: L,
}

impl<L> Debug for NotificationApi<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi")
    }
}

impl<L> NotificationApi<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

impl<L> NotificationApi<L>
where L: LedgerManagement
{
    /// Authenticate a payment notification and report its outcome to the ledger.
    ///
    /// The `MerchantSignature` field is removed from the notification and checked against the fields listed in
    /// `signed_fields`. If it is missing or does not match, or `secret_key` is empty, [`NotificationError::PaymentValidation`] is returned and
    /// the ledger is never contacted.
    ///
    /// Otherwise the authorisation result is classified and exactly one settlement record is submitted to the ledger
    /// under the notification's merchant reference. The ledger's response is returned unchanged.
    pub async fn handle(
        &self,
        mut params: NotificationParameters,
        signed_fields: &SignedFieldSpec,
        secret_key: &[u8],
    ) -> Result<ProcessPaymentResponseModel, NotificationError> {
        if secret_key.is_empty() {
            error!("🧾️ No merchant secret key is configured. Payment notifications cannot be verified.");
            return Err(NotificationError::validation());
        }
        let signature = params.take(param_keys::MERCHANT_SIGNATURE).ok_or_else(|| {
            warn!("🧾️ Payment notification arrived without a merchant signature. Rejecting it.");
            NotificationError::validation()
        })?;
        if !verify_merchant_signature(&params, signed_fields, &signature, secret_key) {
            warn!("🧾️ Payment notification failed signature verification. Rejecting it.");
            return Err(NotificationError::validation());
        }
        let code = params.get(param_keys::AUTHORISATION_RESULT).unwrap_or_default();
        let auth_result = AuthResult::classify(code);
        if auth_result == AuthResult::Error {
            info!("🧾️ Unrecognised authorisation result '{code}'. Settling the payment as an error.");
        }
        let model = ProcessPaymentModel::from_notification(auth_result, &params);
        let merchant_reference = model.merchant_reference.clone().unwrap_or_else(|| {
            warn!("🧾️ Verified payment notification has no merchant reference. The ledger will probably reject it.");
            String::default()
        });
        debug!("🧾️ Payment [{merchant_reference}] settled as {auth_result}. Reporting to the ledger.");
        let response = self.ledger.process_payment(&merchant_reference, &model).await.map_err(|e| {
            error!("🧾️ Could not report payment [{merchant_reference}] to the ledger. {e}");
            NotificationError::from(e)
        })?;
        info!("🧾️ Payment [{merchant_reference}] recorded as {auth_result}");
        Ok(response)
    }
}
