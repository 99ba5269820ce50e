//! A throwaway serializer that reads back a single primitive.
//!
//! Used to decode marker payloads and to tell byte elements apart from other
//! sequence elements. Anything that is not a byte, a string or an unsigned
//! integer is refused with [`NotProbed`].

use serde::ser::{self, Impossible, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Probed {
    Byte(u8),
    Text(String),
    Wide(u128),
}

#[derive(Debug)]
pub(crate) struct NotProbed;

impl fmt::Display for NotProbed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value is not a probed primitive")
    }
}

impl std::error::Error for NotProbed {}

impl ser::Error for NotProbed {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        NotProbed
    }
}

pub(crate) struct Probe;

impl Probe {
    pub(crate) fn byte<T: Serialize + ?Sized>(value: &T) -> Option<u8> {
        match value.serialize(Probe) {
            Ok(Probed::Byte(b)) => Some(b),
            _ => None,
        }
    }
}

type Refused = Impossible<Probed, NotProbed>;

impl ser::Serializer for Probe {
    type Ok = Probed;
    type Error = NotProbed;
    type SerializeSeq = Refused;
    type SerializeTuple = Refused;
    type SerializeTupleStruct = Refused;
    type SerializeTupleVariant = Refused;
    type SerializeMap = Refused;
    type SerializeStruct = Refused;
    type SerializeStructVariant = Refused;

    fn serialize_u8(self, v: u8) -> Result<Probed, NotProbed> {
        Ok(Probed::Byte(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Probed, NotProbed> {
        Ok(Probed::Wide(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Probed, NotProbed> {
        Ok(Probed::Wide(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Probed, NotProbed> {
        Ok(Probed::Wide(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Probed, NotProbed> {
        Ok(Probed::Wide(v))
    }

    fn serialize_str(self, v: &str) -> Result<Probed, NotProbed> {
        Ok(Probed::Text(v.to_string()))
    }

    fn serialize_bool(self, _v: bool) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_i8(self, _v: i8) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_i16(self, _v: i16) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_i32(self, _v: i32) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_i64(self, _v: i64) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_f32(self, _v: f32) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_f64(self, _v: f64) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_char(self, _v: char) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_none(self) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_unit(self) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _value: &T,
    ) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Probed, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Refused, NotProbed> {
        Err(NotProbed)
    }
}
