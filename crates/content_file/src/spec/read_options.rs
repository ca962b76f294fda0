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

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

// Helper function to parse a property from a HashMap
// If the property is not found, use the default value
fn parse_property<T: FromStr>(
    properties: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T>
where
    <T as FromStr>::Err: Display,
{
    properties.get(key).map_or(Ok(default), |value| {
        value.parse::<T>().map_err(|e| {
            Error::new(
                ErrorKind::DataInvalid,
                format!("Invalid value for {key}: {e}"),
            )
        })
    })
}

/// Options controlling how content files are read from raw manifest entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentFileReadOptions {
    /// Check the record invariants of every file read.
    pub validate_invariants: bool,
    /// Keep statistics on files collected by `read_all`.
    pub keep_stats: bool,
}

impl ContentFileReadOptions {
    /// Property to check split offset order and equality ids on read.
    pub const PROPERTY_VALIDATE_INVARIANTS: &str = "read.content-file.validate-invariants";
    /// Default value for [`Self::PROPERTY_VALIDATE_INVARIANTS`].
    pub const PROPERTY_VALIDATE_INVARIANTS_DEFAULT: bool = true;

    /// Property to keep column statistics on collected files.
    pub const PROPERTY_KEEP_STATS: &str = "read.content-file.keep-stats";
    /// Default value for [`Self::PROPERTY_KEEP_STATS`].
    pub const PROPERTY_KEEP_STATS_DEFAULT: bool = true;
}

impl Default for ContentFileReadOptions {
    fn default() -> Self {
        Self {
            validate_invariants: Self::PROPERTY_VALIDATE_INVARIANTS_DEFAULT,
            keep_stats: Self::PROPERTY_KEEP_STATS_DEFAULT,
        }
    }
}

impl TryFrom<&HashMap<String, String>> for ContentFileReadOptions {
    type Error = Error;

    fn try_from(props: &HashMap<String, String>) -> Result<Self> {
        Ok(ContentFileReadOptions {
            validate_invariants: parse_property(
                props,
                ContentFileReadOptions::PROPERTY_VALIDATE_INVARIANTS,
                ContentFileReadOptions::PROPERTY_VALIDATE_INVARIANTS_DEFAULT,
            )?,
            keep_stats: parse_property(
                props,
                ContentFileReadOptions::PROPERTY_KEEP_STATS,
                ContentFileReadOptions::PROPERTY_KEEP_STATS_DEFAULT,
            )?,
        })
    }
}
