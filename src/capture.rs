//! Capturing values into tokens.
//!
//! This module provides the [`Capture`] trait and the [`Capturer`], a serde
//! `Serializer` that classifies whatever a `Serialize` impl emits into a
//! [`Candidate`] and hands it to the policy chain.
//!
//! ## Overview
//!
//! The capturer is bound to one recursion depth. Children (sequence elements,
//! map keys and values, struct fields) are converted while they are emitted,
//! through a sub-converter one level deeper:
//!
//! - **Depth**: a child below depth zero becomes the null scalar without being
//!   serialized at all, which is what bounds cyclic graphs
//! - **Items**: children past the item limit are never converted
//! - **Faults**: a failing struct field becomes a text scalar describing the
//!   failure; siblings are still captured
//!
//! `Option::None` and `()` are absent values and short-circuit to the null
//! scalar. `Some` and newtype structs are transparent.
//!
//! A sequence whose elements are all `u8` is captured as bytes. An empty
//! `Vec<u8>` has no elements to tell it apart from any other empty sequence,
//! so it becomes an empty [`Token::Sequence`]. Types that call
//! `serialize_bytes` directly, such as `serde_bytes::ByteBuf`, stay bytes
//! even when empty.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{Capture, ConversionEngine, Token};
//!
//! let engine = ConversionEngine::default();
//! let args: [&dyn Capture; 3] = [&1, &"two", &vec![3.0]];
//! let tokens: Vec<Token> = args.iter().map(|a| engine.convert(*a)).collect();
//! assert_eq!(tokens[2].to_string(), "[3]");
//! ```

use crate::markers::{self, duration_from_nanos};
use crate::policy::Candidate;
use crate::probe::{Probe, Probed};
use crate::{ConversionEngine, Error, LimitedConverter, Property, Result, Scalar, Token};
use chrono::DateTime;
use num_bigint::BigInt;
use serde::{ser, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// A value that can be captured into a [`Token`].
///
/// Implemented for every `Serialize` type; the trait exists so argument lists
/// can be written as `&[&dyn Capture]`.
pub trait Capture {
    fn capture(&self, capturer: Capturer<'_>) -> Result<Token>;
}

impl<T: Serialize + ?Sized> Capture for T {
    fn capture(&self, capturer: Capturer<'_>) -> Result<Token> {
        self.serialize(capturer)
    }
}

/// A serde `Serializer` producing one [`Token`] at a fixed depth.
pub struct Capturer<'c> {
    engine: &'c ConversionEngine,
    depth: i32,
}

impl<'c> Capturer<'c> {
    pub(crate) fn new(engine: &'c ConversionEngine, depth: i32) -> Self {
        Capturer { engine, depth }
    }

    /// The converter for this value's children.
    fn children(&self) -> LimitedConverter<'c> {
        LimitedConverter::new(self.engine, self.depth - 1)
    }

    fn dispatch(self, candidate: Candidate<'_>) -> Result<Token> {
        Ok(self.engine.dispatch(&self.children(), candidate))
    }

    fn primitive(self, scalar: Scalar) -> Result<Token> {
        self.dispatch(Candidate::Primitive(scalar))
    }

    fn marker<T: ?Sized + Serialize>(self, name: &'static str, value: &T) -> Result<Token> {
        let probed = value
            .serialize(Probe)
            .map_err(|_| Error::unsupported(&format!("malformed {} payload", name)))?;

        let candidate = match (name, probed) {
            (markers::TYPE_INFO, Probed::Text(s)) => Candidate::TypeInfo(s),
            (markers::CALLABLE, Probed::Text(s)) => Candidate::Callable(s),
            (markers::TIMESTAMP, Probed::Text(s)) => {
                let dt = DateTime::parse_from_rfc3339(&s).map_err(Error::custom)?;
                Candidate::Primitive(Scalar::DateTime(dt))
            }
            (markers::INTERVAL, Probed::Wide(nanos)) => {
                Candidate::Primitive(Scalar::Duration(duration_from_nanos(nanos)))
            }
            (markers::IDENTIFIER, Probed::Text(s)) => {
                Candidate::Primitive(Scalar::Uuid(Uuid::parse_str(&s).map_err(Error::custom)?))
            }
            (markers::LOCATOR, Probed::Text(s)) => {
                Candidate::Primitive(Scalar::Url(Url::parse(&s).map_err(Error::custom)?))
            }
            _ => return Err(Error::unsupported(&format!("malformed {} payload", name))),
        };
        self.dispatch(candidate)
    }

    fn record(self, type_name: &'static str, len: usize) -> RecordCapture<'c> {
        let converter = self.children();
        RecordCapture {
            converter,
            type_name,
            properties: Vec::with_capacity(len.min(converter.limits().cap())),
        }
    }

    fn sequence(self, len: Option<usize>) -> SeqCapture<'c> {
        let converter = self.children();
        SeqCapture {
            converter,
            run: Some(ByteRun::new(converter)),
            elements: Vec::with_capacity(len.unwrap_or(0).min(converter.limits().cap()).min(256)),
        }
    }
}

fn is_marker(name: &str) -> bool {
    name.starts_with("$serde_capture::")
}

impl<'c> ser::Serializer for Capturer<'c> {
    type Ok = Token;
    type Error = Error;

    type SerializeSeq = SeqCapture<'c>;
    type SerializeTuple = SeqCapture<'c>;
    type SerializeTupleStruct = SeqCapture<'c>;
    type SerializeTupleVariant = RecordCapture<'c>;
    type SerializeMap = MapCapture<'c>;
    type SerializeStruct = RecordCapture<'c>;
    type SerializeStructVariant = RecordCapture<'c>;

    fn serialize_bool(self, v: bool) -> Result<Token> {
        self.primitive(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Token> {
        self.primitive(Scalar::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Token> {
        let scalar = match i64::try_from(v) {
            Ok(i) => Scalar::Int(i),
            Err(_) => Scalar::BigInt(BigInt::from(v)),
        };
        self.primitive(scalar)
    }

    fn serialize_u8(self, v: u8) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Token> {
        self.primitive(Scalar::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Token> {
        self.primitive(Scalar::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Token> {
        let scalar = match u64::try_from(v) {
            Ok(u) => Scalar::UInt(u),
            Err(_) => Scalar::BigInt(BigInt::from(v)),
        };
        self.primitive(scalar)
    }

    fn serialize_f32(self, v: f32) -> Result<Token> {
        self.primitive(Scalar::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Token> {
        self.primitive(Scalar::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Token> {
        self.primitive(Scalar::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Token> {
        self.dispatch(Candidate::Str(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Token> {
        self.dispatch(Candidate::Bytes {
            bytes: Cow::Borrowed(v),
            len: v.len(),
        })
    }

    fn serialize_none(self) -> Result<Token> {
        Ok(Token::null())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Token>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Token> {
        Ok(Token::null())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Token> {
        self.dispatch(Candidate::Struct {
            type_name: name,
            properties: Vec::new(),
        })
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Token> {
        self.dispatch(Candidate::Variant {
            type_name: name,
            variant,
        })
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Token>
    where
        T: ?Sized + Serialize,
    {
        if is_marker(name) {
            self.marker(name, value)
        } else {
            value.serialize(self)
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Token>
    where
        T: ?Sized + Serialize,
    {
        let mut record = self.record(variant, 1);
        record.field("0", value);
        record.finish()
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture<'c>> {
        Ok(self.sequence(len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture<'c>> {
        Ok(self.sequence(Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCapture<'c>> {
        Ok(self.sequence(Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordCapture<'c>> {
        Ok(self.record(variant, len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapCapture<'c>> {
        Ok(MapCapture {
            converter: self.children(),
            entries: Vec::new(),
            pending: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordCapture<'c>> {
        Ok(self.record(name, len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordCapture<'c>> {
        Ok(self.record(variant, len))
    }
}

/// Bytes seen so far while every element of a sequence has been a `u8`.
struct ByteRun {
    retained: Vec<u8>,
    len: usize,
    keep: usize,
}

impl ByteRun {
    fn new(converter: LimitedConverter<'_>) -> Self {
        let limits = converter.limits();
        let keep = if limits.byte_array_limit == 0 || limits.item_limit == 0 {
            usize::MAX
        } else {
            limits.byte_array_limit.max(limits.item_limit).max(16)
        };
        ByteRun {
            retained: Vec::new(),
            len: 0,
            keep,
        }
    }

    fn push(&mut self, byte: u8) {
        if self.retained.len() < self.keep {
            self.retained.push(byte);
        }
        self.len += 1;
    }
}

/// Collects sequence, tuple and tuple struct elements.
pub struct SeqCapture<'c> {
    converter: LimitedConverter<'c>,
    run: Option<ByteRun>,
    elements: Vec<Token>,
}

impl SeqCapture<'_> {
    fn element<T: ?Sized + Serialize>(&mut self, value: &T) {
        if let Some(run) = self.run.as_mut() {
            if let Some(byte) = Probe::byte(value) {
                run.push(byte);
                return;
            }
        }
        if let Some(run) = self.run.take() {
            for byte in run.retained {
                self.push(&byte);
            }
        }
        self.push(value);
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) {
        if self.converter.limits().admits(self.elements.len()) {
            self.elements.push(self.converter.convert(value));
        }
    }

    fn finish(self) -> Result<Token> {
        let candidate = match self.run {
            Some(run) if run.len > 0 => Candidate::Bytes {
                bytes: Cow::Owned(run.retained),
                len: run.len,
            },
            _ => Candidate::Seq(self.elements),
        };
        Ok(self.converter.engine().dispatch(&self.converter, candidate))
    }
}

impl ser::SerializeSeq for SeqCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}

/// Collects map entries as converted key/value pairs.
pub struct MapCapture<'c> {
    converter: LimitedConverter<'c>,
    entries: Vec<(Token, Token)>,
    /// `Some(None)` marks a key past the item limit whose value is dropped.
    pending: Option<Option<Token>>,
}

impl ser::SerializeMap for MapCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending = if self.converter.limits().admits(self.entries.len()) {
            Some(Some(self.converter.convert(key)))
        } else {
            Some(None)
        };
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.pending.take() {
            Some(Some(key)) => {
                let value = self.converter.convert(value);
                self.entries.push((key, value));
                Ok(())
            }
            Some(None) => Ok(()),
            None => Err(Error::unsupported("map value emitted without a key")),
        }
    }

    fn end(self) -> Result<Token> {
        let candidate = Candidate::Map(self.entries);
        Ok(self.converter.engine().dispatch(&self.converter, candidate))
    }
}

/// Collects struct fields, and the fields of enum variants.
pub struct RecordCapture<'c> {
    converter: LimitedConverter<'c>,
    type_name: &'static str,
    properties: Vec<Property>,
}

impl RecordCapture<'_> {
    fn field<T: ?Sized + Serialize>(&mut self, name: &str, value: &T) {
        if !self.converter.limits().admits(self.properties.len()) {
            return;
        }
        if self.properties.iter().any(|p| p.name() == name) {
            debug!(member = name, type_name = self.type_name, "skipping shadowed member");
            return;
        }

        let token = match self.converter.try_convert(value) {
            Ok(token) => token,
            Err(err) => {
                warn!(
                    member = %format_args!("{}.{}", self.type_name, name),
                    error = %err,
                    "member accessor failed"
                );
                Token::text(format!(
                    "The property accessor '{}.{}' failed: {}",
                    self.type_name, name, err
                ))
            }
        };

        match Property::new(name, token) {
            Ok(property) => self.properties.push(property),
            Err(err) => debug!(type_name = self.type_name, error = %err, "skipping unnamed member"),
        }
    }

    fn finish(self) -> Result<Token> {
        let candidate = Candidate::Struct {
            type_name: self.type_name,
            properties: self.properties,
        };
        Ok(self.converter.engine().dispatch(&self.converter, candidate))
    }
}

impl ser::SerializeStruct for RecordCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for RecordCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for RecordCapture<'_> {
    type Ok = Token;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let index = self.properties.len().to_string();
        self.field(&index, value);
        Ok(())
    }

    fn end(self) -> Result<Token> {
        self.finish()
    }
}
