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

//! Metadata model for the data and delete files of an Apache Iceberg table.
//!
//! A [`spec::ContentFile`] describes one physical file: where it lives, its
//! partition tuple, its size and row count, optional column statistics, and
//! what it holds (rows, position deletes or equality deletes).
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use iceberg_content_file::Result;
//! use iceberg_content_file::spec::{ContentFile, DataFileFormat, Literal, Struct};
//!
//! fn main() -> Result<()> {
//!     let file = ContentFile::data_builder()
//!         .spec_id(0)
//!         .file_path("s3://bucket/table/data/00000-0.parquet")
//!         .file_format(DataFileFormat::Parquet)
//!         .partition(Struct::from_iter([Some(Literal::int(2024))]))
//!         .record_count(100)
//!         .file_size_in_bytes(2048)
//!         .lower_bounds(HashMap::from([(1, vec![0, 0, 0, 0])]))
//!         .split_offsets(vec![0, 512, 1024, 1536])
//!         .build()?;
//!
//!     // Keep only what is needed to prune files.
//!     let slim = file.copy_without_stats();
//!     assert!(slim.lower_bounds().is_none());
//!     assert_eq!(slim.split_offsets(), file.split_offsets());
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate derive_builder;

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod spec;
