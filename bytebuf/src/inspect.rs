///
/// Inspection and JSON form.
///
/// `inspect` renders `<Buffer 68 69>`, capped at the configured
/// `inspect_max_bytes`. The JSON form is `{"type":"Buffer","data":[...]}`.
///

use crate::buffer::Buffer;
use bytebuf_core::config;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};

const JSON_TYPE: &str = "Buffer";

#[derive(Serialize)]
struct JsonForm<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: Vec<u8>,
}

#[derive(Deserialize)]
struct OwnedJsonForm {
    #[serde(rename = "type")]
    kind: String,
    data: Vec<u8>,
}

impl Buffer {
    pub fn inspect(&self) -> String {
        let max = config::current().inspect_max_bytes;
        let shown = self.len().min(max);
        let mut out = String::from("<Buffer ");
        self.with_bytes(|b| {
            for (i, byte) in b[..shown].iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:02x}", byte);
            }
        });
        let remaining = self.len() - shown;
        if remaining > 0 {
            let _ = write!(
                out,
                " ... {} more byte{}",
                remaining,
                if remaining > 1 { "s" } else { "" }
            );
        }
        out.push('>');
        out
    }

    /// The JSON object form as a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "type": JSON_TYPE, "data": self.to_vec() })
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonForm {
            kind: JSON_TYPE,
            data: self.to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Buffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let form = OwnedJsonForm::deserialize(deserializer)?;
        if form.kind != JSON_TYPE {
            return Err(D::Error::custom(format!(
                "expected type \"{}\", found \"{}\"",
                JSON_TYPE, form.kind
            )));
        }
        Ok(Buffer::from_vec(form.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect() {
        assert_eq!(Buffer::from_bytes(b"hi").inspect(), "<Buffer 68 69>");
        assert_eq!(Buffer::alloc(0).unwrap().inspect(), "<Buffer >");
        assert_eq!(format!("{:?}", Buffer::from_bytes(&[0, 255])), "<Buffer 00 ff>");
    }

    #[test]
    fn test_inspect_truncates() {
        let max = config::current().inspect_max_bytes;
        let buf = Buffer::alloc(max + 2).unwrap();
        assert!(buf.inspect().ends_with("00 ... 2 more bytes>"));
        let buf = Buffer::alloc(max + 1).unwrap();
        assert!(buf.inspect().ends_with("00 ... 1 more byte>"));
    }

    #[test]
    fn test_json_round_trip() {
        let buf = Buffer::from_bytes(&[1, 2, 3]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, r#"{"type":"Buffer","data":[1,2,3]}"#);
        assert_eq!(buf.to_json(), serde_json::json!({"type": "Buffer", "data": [1, 2, 3]}));
        let back: Buffer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_json_rejects_other_types() {
        let err = serde_json::from_str::<Buffer>(r#"{"type":"Blob","data":[]}"#).unwrap_err();
        assert!(err.to_string().contains("expected type \"Buffer\""));
    }
}
