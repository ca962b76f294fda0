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

//! Primitive literal types

use ordered_float::OrderedFloat;
use serde_derive::{Deserialize, Serialize};

/// Values present in a partition tuple
#[derive(Clone, Debug, PartialOrd, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum PrimitiveLiteral {
    /// Boolean partition value
    Boolean(bool),
    /// Partition value of an `int` column; `date` values (days since epoch)
    /// and the `bucket`, `year`, `month`, `day` and `hour` transforms land here
    Int(i32),
    /// Partition value of a `long`, `time` or `timestamp` column
    Long(i64),
    /// Single precision partition value; NaN compares equal to itself
    Float(OrderedFloat<f32>),
    /// Double precision partition value; NaN compares equal to itself
    Double(OrderedFloat<f64>),
    /// Partition value of a `string` column, or the output of `truncate` on one
    String(String),
    /// Partition value of a `binary`, `fixed` or `uuid` column
    Binary(Vec<u8>),
    /// Unscaled value of a `decimal` partition column
    Int128(i128),
    /// Partition value of a `uuid` column held as a single number
    UInt128(u128),
}

impl PrimitiveLiteral {
    /// Returns true for a `Float` or `Double` partition value that is NaN
    pub fn is_nan(&self) -> bool {
        match self {
            PrimitiveLiteral::Double(val) => val.is_nan(),
            PrimitiveLiteral::Float(val) => val.is_nan(),
            _ => false,
        }
    }
}
