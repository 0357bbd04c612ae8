// ABOUTME: The conventional delivery receipt text carried in deliver_sm short_message
// ABOUTME: "id:.. sub:.. dlvrd:.. submit date:.. done date:.. stat:.. err:.. text:.."

use crate::datatypes::MessageState;
use std::fmt;
use thiserror::Error;

/// A delivery receipt as formatted by most SMSCs.
///
/// Dates are kept as the SMSC sent them (normally `YYMMDDhhmm`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub submitted: u16,
    pub delivered: u16,
    pub submit_date: String,
    pub done_date: String,
    pub state: MessageState,
    /// As sent. Usually three decimal digits, but some SMSCs send hex or
    /// vendor codes here.
    pub error_code: String,
    /// The first characters of the original message; often empty.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryReceiptError {
    #[error("delivery receipt is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("delivery receipt field '{field}' is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown delivery receipt state {0:?}")]
    UnknownState(String),

    #[error("delivery receipt is not valid UTF-8")]
    InvalidUtf8,
}

impl DeliveryReceipt {
    pub fn parse(s: &str) -> Result<Self, DeliveryReceiptError> {
        let rest = s
            .trim_start()
            .strip_prefix("id:")
            .ok_or(DeliveryReceiptError::MissingField("id"))?;
        let (message_id, rest) = take_until(rest, " sub:", "sub")?;
        let (submitted, rest) = take_until(rest, " dlvrd:", "dlvrd")?;
        let (delivered, rest) = take_until(rest, " submit date:", "submit date")?;
        let (submit_date, rest) = take_until(rest, " done date:", "done date")?;
        let (done_date, rest) = take_until(rest, " stat:", "stat")?;
        let (state, rest) = take_until(rest, " err:", "err")?;
        let (error_code, text) = match rest.find(" text:") {
            Some(i) => (&rest[..i], &rest[i + " text:".len()..]),
            None => (rest, ""),
        };

        Ok(DeliveryReceipt {
            message_id: message_id.to_string(),
            submitted: parse_number("sub", submitted)?,
            delivered: parse_number("dlvrd", delivered)?,
            submit_date: submit_date.to_string(),
            done_date: done_date.to_string(),
            state: state
                .trim()
                .parse()
                .map_err(|_| DeliveryReceiptError::UnknownState(state.to_string()))?,
            error_code: error_code.trim().to_string(),
            text: text.to_string(),
        })
    }

    /// The error code as a decimal number, when it is one.
    pub fn error_code_value(&self) -> Option<u16> {
        self.error_code.parse().ok()
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, DeliveryReceiptError> {
        let s = std::str::from_utf8(bytes).map_err(|_| DeliveryReceiptError::InvalidUtf8)?;
        Self::parse(s)
    }
}

fn take_until<'a>(
    s: &'a str,
    label: &str,
    field: &'static str,
) -> Result<(&'a str, &'a str), DeliveryReceiptError> {
    let i = s.find(label).ok_or(DeliveryReceiptError::MissingField(field))?;
    Ok((&s[..i], &s[i + label.len()..]))
}

fn parse_number(field: &'static str, value: &str) -> Result<u16, DeliveryReceiptError> {
    value
        .trim()
        .parse()
        .map_err(|_| DeliveryReceiptError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id:{} sub:{:03} dlvrd:{:03} submit date:{} done date:{} stat:{} err:{} text:{}",
            self.message_id,
            self.submitted,
            self.delivered,
            self.submit_date,
            self.done_date,
            self.state,
            self.error_code,
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT: &str = "id:msg123 sub:001 dlvrd:001 submit date:2206121200 done date:2206121201 stat:DELIVRD err:000 text:";

    #[test]
    fn parse_standard_receipt() {
        let receipt = DeliveryReceipt::parse(RECEIPT).unwrap();
        assert_eq!(receipt.message_id, "msg123");
        assert_eq!(receipt.submitted, 1);
        assert_eq!(receipt.delivered, 1);
        assert_eq!(receipt.submit_date, "2206121200");
        assert_eq!(receipt.done_date, "2206121201");
        assert_eq!(receipt.state, MessageState::Delivered);
        assert_eq!(receipt.error_code, "000");
        assert_eq!(receipt.error_code_value(), Some(0));
        assert_eq!(receipt.text, "");
        assert_eq!(receipt.to_string(), RECEIPT);
    }

    #[test]
    fn text_may_contain_spaces_and_colons() {
        let s = "id:9 sub:001 dlvrd:000 submit date:2401011200 done date:2401011300 stat:UNDELIV err:034 text:Hi there: you";
        let receipt = DeliveryReceipt::parse(s).unwrap();
        assert_eq!(receipt.state, MessageState::Undeliverable);
        assert_eq!(receipt.error_code_value(), Some(34));
        assert_eq!(receipt.text, "Hi there: you");
    }

    #[test]
    fn non_decimal_error_codes_are_kept() {
        let s = RECEIPT.replace("err:000", "err:0x1F");
        let receipt = DeliveryReceipt::parse(&s).unwrap();
        assert_eq!(receipt.error_code, "0x1F");
        assert_eq!(receipt.error_code_value(), None);
        assert_eq!(receipt.to_string(), s);

        let s = RECEIPT.replace("err:000", "err:E12");
        assert_eq!(DeliveryReceipt::parse(&s).unwrap().error_code, "E12");
    }

    #[test]
    fn text_field_is_optional() {
        let s = "id:9 sub:001 dlvrd:001 submit date:2401011200 done date:2401011300 stat:DELIVRD err:000";
        assert_eq!(DeliveryReceipt::parse(s).unwrap().text, "");
    }

    #[test]
    fn errors() {
        assert_eq!(
            DeliveryReceipt::parse("hello"),
            Err(DeliveryReceiptError::MissingField("id"))
        );
        let bad_state = RECEIPT.replace("DELIVRD", "WHATEVR");
        assert_eq!(
            DeliveryReceipt::parse(&bad_state),
            Err(DeliveryReceiptError::UnknownState("WHATEVR".to_string()))
        );
        assert_eq!(
            DeliveryReceipt::parse_bytes(&[0xFF, 0xFE]),
            Err(DeliveryReceiptError::InvalidUtf8)
        );
    }
}
