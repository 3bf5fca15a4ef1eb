// Wire types of the toncenter v2 HTTP API
use crate::entity::BatchError;
use crate::ton::utils::{cell_from_base64, cell_to_base64};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tonlib_core::cell::{ArcCell, Cell};

/// Envelope of every toncenter response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error: Option<String>,
    pub code: Option<i32>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, BatchError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BatchError::TonApi(format!(
                "{} (code {})",
                self.error.unwrap_or_else(|| "empty response".to_string()),
                self.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunGetMethodRequest {
    pub address: String,
    pub method: String,
    pub stack: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RunGetMethodResult {
    pub exit_code: i32,
    #[serde(default)]
    pub stack: Vec<Value>,
}

/// Account state as reported by `getAddressState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    Active,
    Uninitialized,
    Frozen,
}

#[derive(Debug, Serialize)]
pub struct SendBocRequest {
    pub boc: String,
}

/// Get-method argument
#[derive(Debug, Clone)]
pub enum StackArg {
    Int(u128),
    Slice(Cell),
}

impl StackArg {
    pub fn to_json(&self) -> Result<Value, BatchError> {
        Ok(match self {
            StackArg::Int(value) => json!(["num", format!("{:#x}", value)]),
            StackArg::Slice(cell) => json!(["tvm.Slice", cell_to_base64(cell)?]),
        })
    }
}

/// Get-method result entry
#[derive(Debug, Clone)]
pub enum StackEntry {
    /// Big-endian magnitude and sign of an integer
    Num { negative: bool, magnitude: Vec<u8> },
    Cell(ArcCell),
}

impl StackEntry {
    pub fn from_json(value: &Value) -> Result<Self, BatchError> {
        let kind = value
            .get(0)
            .and_then(Value::as_str)
            .ok_or_else(|| BatchError::TonApi(format!("unexpected stack entry {}", value)))?;
        let payload = value
            .get(1)
            .ok_or_else(|| BatchError::TonApi(format!("stack entry without value {}", value)))?;

        match kind {
            "num" => {
                let text = payload
                    .as_str()
                    .ok_or_else(|| BatchError::TonApi(format!("non-string number {}", payload)))?;
                parse_num(text)
            }
            "cell" | "slice" | "tvm.Cell" | "tvm.Slice" => {
                let bytes = payload
                    .get("bytes")
                    .and_then(Value::as_str)
                    .or_else(|| payload.as_str())
                    .ok_or_else(|| BatchError::TonApi(format!("cell entry without bytes {}", payload)))?;
                Ok(StackEntry::Cell(cell_from_base64(bytes)?))
            }
            other => Err(BatchError::TonApi(format!("unsupported stack entry type {}", other))),
        }
    }

    pub fn as_u128(&self) -> Result<u128, BatchError> {
        match self {
            StackEntry::Num {
                negative: false,
                magnitude,
            } if magnitude.len() <= 16 => {
                Ok(magnitude.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128))
            }
            other => Err(BatchError::TonApi(format!("expected unsigned number, got {:?}", other))),
        }
    }

    pub fn as_cell(&self) -> Result<&ArcCell, BatchError> {
        match self {
            StackEntry::Cell(cell) => Ok(cell),
            other => Err(BatchError::TonApi(format!("expected cell, got {:?}", other))),
        }
    }
}

fn parse_num(text: &str) -> Result<StackEntry, BatchError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let hex = digits
        .strip_prefix("0x")
        .ok_or_else(|| BatchError::TonApi(format!("number {} is not hex", text)))?;

    let hex = hex.trim_start_matches('0');
    let padded = if hex.len() % 2 == 1 {
        format!("0{}", hex)
    } else {
        hex.to_string()
    };

    let magnitude = (0..padded.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&padded[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| BatchError::TonApi(format!("invalid hex number {}", text)))?;

    Ok(StackEntry::Num {
        negative: negative && !magnitude.is_empty(),
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonlib_core::cell::CellBuilder;

    #[test]
    fn test_parse_numbers() {
        let entry = StackEntry::from_json(&json!(["num", "0x3b9aca00"])).unwrap();
        assert_eq!(entry.as_u128().unwrap(), 1_000_000_000);

        let zero = StackEntry::from_json(&json!(["num", "0x0"])).unwrap();
        assert_eq!(zero.as_u128().unwrap(), 0);

        let negative = StackEntry::from_json(&json!(["num", "-0x1"])).unwrap();
        assert!(negative.as_u128().is_err());
    }

    #[test]
    fn test_parse_cell_entry() {
        let entry = StackEntry::from_json(&json!([
            "cell",
            {"bytes": "te6ccgEBAQEAAgAAAA==", "object": {}}
        ]))
        .unwrap();
        let empty = CellBuilder::new().build().unwrap();
        assert_eq!(entry.as_cell().unwrap().cell_hash(), empty.cell_hash());
    }

    #[test]
    fn test_stack_arg_json() {
        assert_eq!(StackArg::Int(0).to_json().unwrap(), json!(["num", "0x0"]));

        let empty = CellBuilder::new().build().unwrap();
        assert_eq!(
            StackArg::Slice(empty).to_json().unwrap(),
            json!(["tvm.Slice", "te6ccgEBAQEAAgAAAA=="])
        );
    }

    #[test]
    fn test_account_state() {
        let response: ApiResponse<AccountState> =
            serde_json::from_value(json!({"ok": true, "result": "uninitialized"})).unwrap();
        assert_eq!(response.into_result().unwrap(), AccountState::Uninitialized);
    }

    #[test]
    fn test_error_envelope() {
        let response: ApiResponse<String> =
            serde_json::from_value(json!({"ok": false, "error": "rate limit", "code": 429})).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.to_string().contains("rate limit"));
    }
}
