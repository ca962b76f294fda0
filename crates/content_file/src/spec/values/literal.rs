// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Literal values stored in partition tuples

use ordered_float::OrderedFloat;
use serde_derive::{Deserialize, Serialize};

use super::primitive::PrimitiveLiteral;
use super::struct_value::Struct;

/// A single (possibly nested) value of a partition tuple.
///
/// Typing comes from the partition spec that owns the tuple; a literal on its
/// own only knows its physical representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// A primitive value
    Primitive(PrimitiveLiteral),
    /// A struct is a tuple of values, ordered by field position.
    Struct(Struct),
    /// A list is a collection of values with some element type.
    List(Vec<Option<Literal>>),
}

impl Literal {
    /// Creates a boolean value.
    ///
    /// Example:
    /// ```rust
    /// use iceberg_content_file::spec::{Literal, PrimitiveLiteral};
    /// let t = Literal::bool(true);
    ///
    /// assert_eq!(Literal::Primitive(PrimitiveLiteral::Boolean(true)), t);
    /// ```
    pub fn bool<T: Into<bool>>(t: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Boolean(t.into()))
    }

    /// Creates an 32bit integer.
    ///
    /// Example:
    /// ```rust
    /// use iceberg_content_file::spec::{Literal, PrimitiveLiteral};
    /// let t = Literal::int(23i8);
    ///
    /// assert_eq!(Literal::Primitive(PrimitiveLiteral::Int(23)), t);
    /// ```
    pub fn int<T: Into<i32>>(t: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Int(t.into()))
    }

    /// Creates an 64bit integer.
    pub fn long<T: Into<i64>>(t: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Long(t.into()))
    }

    /// Creates an 32bit floating point number.
    pub fn float<T: Into<f32>>(t: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Float(OrderedFloat(t.into())))
    }

    /// Creates an 64bit floating point number.
    pub fn double<T: Into<f64>>(t: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Double(OrderedFloat(t.into())))
    }

    /// Creates date literal from number of days from unix epoch directly.
    pub fn date(days: i32) -> Self {
        Self::Primitive(PrimitiveLiteral::Int(days))
    }

    /// Creates a string literal.
    pub fn string<S: ToString>(s: S) -> Self {
        Self::Primitive(PrimitiveLiteral::String(s.to_string()))
    }

    /// Creates a binary literal from bytes.
    ///
    /// Example:
    /// ```rust
    /// use iceberg_content_file::spec::{Literal, PrimitiveLiteral};
    /// let t = Literal::binary(vec![1u8, 2u8]);
    ///
    /// assert_eq!(Literal::Primitive(PrimitiveLiteral::Binary(vec![1u8, 2u8])), t);
    /// ```
    pub fn binary<T: Into<Vec<u8>>>(value: T) -> Self {
        Self::Primitive(PrimitiveLiteral::Binary(value.into()))
    }

    /// Returns the primitive value, if this literal is one.
    pub fn as_primitive_literal(&self) -> Option<&PrimitiveLiteral> {
        match self {
            Literal::Primitive(v) => Some(v),
            _ => None,
        }
    }
}
