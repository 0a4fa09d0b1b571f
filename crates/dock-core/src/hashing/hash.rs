//! Digests SHA-256.
//!
//! `hash_inputs` ordena los identificadores antes de hashear, así el digest no
//! depende del orden de subida. Si un archivo no puede leerse se hashea su
//! identificador en lugar del contenido: el hashing nunca falla.
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::to_canonical_json;

/// Digest de 256 bits. Se muestra y serializa como hex en minúsculas.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest256([u8; 32]);

impl Digest256 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn from_hasher(h: Sha256) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&h.finalize());
        Self(bytes)
    }
}

impl fmt::Display for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest256({})", self.to_hex())
    }
}

impl FromStr for Digest256 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).map_err(|e| format!("invalid digest {s:?}: {e}"))?;
        Ok(Self(out))
    }
}

impl Serialize for Digest256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Digest de la entrada vacía (SHA-256 de cero bytes).
pub fn empty_digest() -> Digest256 {
    Digest256::from_hasher(Sha256::new())
}

pub fn hash_bytes(bytes: &[u8]) -> Digest256 {
    let mut h = Sha256::new();
    h.update(bytes);
    Digest256::from_hasher(h)
}

/// Hash del texto del reporte (UTF-8).
pub fn hash_report(text: &str) -> Digest256 {
    hash_bytes(text.as_bytes())
}

/// Hash de un valor JSON en forma canónica.
pub fn hash_value(value: &Value) -> Digest256 {
    hash_report(&to_canonical_json(value))
}

/// Resultado de `hash_inputs_detailed`: el digest y qué inputs se degradaron
/// a su identificador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDigest {
    pub digest: Digest256,
    pub unreadable: Vec<String>,
}

/// Hash del conjunto de inputs, independiente del orden.
pub fn hash_inputs<S: AsRef<str>>(identifiers: &[S]) -> Digest256 {
    hash_inputs_detailed(identifiers).digest
}

pub fn hash_inputs_detailed<S: AsRef<str>>(identifiers: &[S]) -> InputDigest {
    let mut sorted: Vec<&str> = identifiers.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    let mut unreadable = Vec::new();
    for id in sorted {
        match std::fs::read(id) {
            Ok(content) => hasher.update(&content),
            Err(e) => {
                warn!("input {} unreadable at hash time ({}); hashing identifier instead", id, e);
                hasher.update(id.as_bytes());
                unreadable.push(id.to_string());
            }
        }
    }
    InputDigest { digest: Digest256::from_hasher(hasher),
                  unreadable }
}
