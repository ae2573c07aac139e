// src/components/forms.rs
//! Modal form state, independent of rendering.
//!
//! A field's value is only captured by `commit`, which the components call on
//! the input's `change` event (fired when the input loses focus). Confirming
//! checks that every field is non-empty; nothing else is validated here.

use crate::account::{MakePaymentInput, TrustAssetInput};
use crate::error::ValidationError;

pub trait ModalForm: Default {
    type Field: Copy;
    type Output;

    fn commit(&mut self, field: Self::Field, value: String);

    fn validate(&self) -> Result<Self::Output, ValidationError>;
}

fn required(name: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(name))
    } else {
        Ok(value.to_string())
    }
}

/// `closed -> open -> (cancel -> closed) | (valid confirm -> closed)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState<F> {
    visible: bool,
    form: F,
}

impl<F: ModalForm> ModalState<F> {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Close and forget anything typed
    pub fn cancel(&mut self) {
        self.visible = false;
        self.form = F::default();
    }

    pub fn commit(&mut self, field: F::Field, value: String) {
        self.form.commit(field, value);
    }

    /// On success the modal closes and hands back the fields. On a missing
    /// field it stays open with its values intact.
    pub fn confirm(&mut self) -> Result<F::Output, ValidationError> {
        let output = self.form.validate()?;
        self.cancel();
        Ok(output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustAssetField {
    AssetCode,
    AssetIssuer,
    Pincode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrustAssetForm {
    pub asset_code: String,
    pub asset_issuer: String,
    pub pincode: String,
}

impl ModalForm for TrustAssetForm {
    type Field = TrustAssetField;
    type Output = TrustAssetInput;

    fn commit(&mut self, field: TrustAssetField, value: String) {
        match field {
            TrustAssetField::AssetCode => self.asset_code = value,
            TrustAssetField::AssetIssuer => self.asset_issuer = value,
            TrustAssetField::Pincode => self.pincode = value,
        }
    }

    fn validate(&self) -> Result<TrustAssetInput, ValidationError> {
        Ok(TrustAssetInput {
            asset_code: required("Asset code", &self.asset_code)?,
            asset_issuer: required("Asset issuer", &self.asset_issuer)?,
            pincode: required("Pincode", &self.pincode)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakePaymentField {
    Destination,
    Amount,
    AssetCode,
    AssetIssuer,
    Pincode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MakePaymentForm {
    pub destination: String,
    pub amount: String,
    pub asset_code: String,
    pub asset_issuer: String,
    pub pincode: String,
}

impl ModalForm for MakePaymentForm {
    type Field = MakePaymentField;
    type Output = MakePaymentInput;

    fn commit(&mut self, field: MakePaymentField, value: String) {
        match field {
            MakePaymentField::Destination => self.destination = value,
            MakePaymentField::Amount => self.amount = value,
            MakePaymentField::AssetCode => self.asset_code = value,
            MakePaymentField::AssetIssuer => self.asset_issuer = value,
            MakePaymentField::Pincode => self.pincode = value,
        }
    }

    fn validate(&self) -> Result<MakePaymentInput, ValidationError> {
        Ok(MakePaymentInput {
            destination: required("Destination", &self.destination)?,
            amount: required("Amount", &self.amount)?,
            asset_code: required("Asset code", &self.asset_code)?,
            asset_issuer: required("Asset issuer", &self.asset_issuer)?,
            pincode: required("Pincode", &self.pincode)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PincodeField;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PincodeForm {
    pub pincode: String,
}

impl ModalForm for PincodeForm {
    type Field = PincodeField;
    type Output = String;

    fn commit(&mut self, _field: PincodeField, value: String) {
        self.pincode = value;
    }

    fn validate(&self) -> Result<String, ValidationError> {
        required("Pincode", &self.pincode)
    }
}
