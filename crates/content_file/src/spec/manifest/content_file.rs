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

use super::content_type::{DataContentType, DataFileFormat};
use crate::ensure_data_valid;
use crate::error::Result;
use crate::spec::{Struct, StructLike};
use crate::{Error, ErrorKind};

/// What a content file holds, together with the data that only makes sense
/// for that kind of content.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum FileContent {
    /// Table rows.
    Data,
    /// Deletes addressed by `(file_path, pos)` of the deleted rows.
    PositionDeletes,
    /// Deletes matched by value on a subset of columns.
    EqualityDeletes {
        /// field id: 135
        /// element field id: 136
        ///
        /// Ids of the columns used for equality comparison. Extra columns
        /// stored in the delete file are not listed here.
        equality_ids: Vec<i32>,
    },
}

impl FileContent {
    /// Builds the content from a content type and optional equality ids, as
    /// they are laid out in a manifest.
    ///
    /// Equality ids are rejected on anything but an equality delete file; an
    /// empty list counts as absent.
    pub fn try_new(content_type: DataContentType, equality_ids: Option<Vec<i32>>) -> Result<Self> {
        match (content_type, equality_ids) {
            (DataContentType::EqualityDeletes, ids) => Ok(FileContent::EqualityDeletes {
                equality_ids: ids.unwrap_or_default(),
            }),
            (content_type, Some(ids)) if !ids.is_empty() => Err(Error::new(
                ErrorKind::DataInvalid,
                format!("equality ids only apply to equality deletes, not {content_type:?}"),
            )
            .with_context("equality_ids", format!("{ids:?}"))),
            (DataContentType::Data, _) => Ok(FileContent::Data),
            (DataContentType::PositionDeletes, _) => Ok(FileContent::PositionDeletes),
        }
    }

    /// The discriminant of this content.
    pub fn content_type(&self) -> DataContentType {
        match self {
            FileContent::Data => DataContentType::Data,
            FileContent::PositionDeletes => DataContentType::PositionDeletes,
            FileContent::EqualityDeletes { .. } => DataContentType::EqualityDeletes,
        }
    }

    /// Equality ids, empty unless this is an equality delete file.
    pub fn equality_ids(&self) -> &[i32] {
        match self {
            FileContent::EqualityDeletes { equality_ids } => equality_ids,
            _ => &[],
        }
    }
}

/// Metadata of one physical data or delete file tracked by a table.
///
/// A `ContentFile` has no mutators: once built it stays as it is. Values
/// handed out by a [`ContentFileReader`](super::ContentFileReader) are
/// borrowed from a slot the reader overwrites on every step; use
/// [`ContentFile::copy`] or [`ContentFile::copy_without_stats`] to keep them.
///
/// Every statistics map is optional, and `None` ("not collected") is kept
/// apart from an empty map.
#[derive(Debug, PartialEq, Eq, Clone, Builder)]
#[builder(build_fn(private, name = "fallible_build", error = "Error"))]
pub struct ContentFile {
    /// Ordinal of the file in the manifest it was read from, `None` if it
    /// was not read from a manifest.
    #[builder(default, setter(strip_option))]
    pub(crate) position: Option<u64>,
    /// Id of the partition spec used to interpret `partition`.
    pub(crate) spec_id: i32,
    /// field id: 134
    ///
    /// Kind of content stored in the file.
    pub(crate) content: FileContent,
    /// field id: 100
    ///
    /// Full URI for the file with FS scheme
    #[builder(setter(into))]
    pub(crate) file_path: String,
    /// field id: 101
    ///
    /// File format name, `avro`, `orc`, `parquet`, or `puffin`
    pub(crate) file_format: DataFileFormat,
    /// field id: 102
    ///
    /// Partition data tuple, shaped by the partition spec `spec_id`
    pub(crate) partition: Struct,
    /// field id: 103
    ///
    /// Number of top-level records in this file
    pub(crate) record_count: u64,
    /// field id: 104
    ///
    /// Total file size in bytes
    pub(crate) file_size_in_bytes: u64,
    /// field id: 108
    ///
    /// Map from column id to the total size on disk of all regions that
    /// store the column.
    #[builder(default, setter(strip_option))]
    pub(crate) column_sizes: Option<HashMap<i32, u64>>,
    /// field id: 109
    ///
    /// Map from column id to number of values in the column (including null
    /// and NaN values)
    #[builder(default, setter(strip_option))]
    pub(crate) value_counts: Option<HashMap<i32, u64>>,
    /// field id: 110
    ///
    /// Map from column id to number of null values in the column
    #[builder(default, setter(strip_option))]
    pub(crate) null_value_counts: Option<HashMap<i32, u64>>,
    /// field id: 137
    ///
    /// Map from column id to number of NaN values in the column
    #[builder(default, setter(strip_option))]
    pub(crate) nan_value_counts: Option<HashMap<i32, u64>>,
    /// field id: 125
    ///
    /// Map from column id to lower bound in the column, in the single-value
    /// binary serialization. Never decoded here.
    #[builder(default, setter(strip_option))]
    pub(crate) lower_bounds: Option<HashMap<i32, Vec<u8>>>,
    /// field id: 128
    ///
    /// Map from column id to upper bound in the column, in the single-value
    /// binary serialization. Never decoded here.
    #[builder(default, setter(strip_option))]
    pub(crate) upper_bounds: Option<HashMap<i32, Vec<u8>>>,
    /// field id: 131
    ///
    /// Implementation-specific key metadata for encryption
    #[builder(default, setter(strip_option, into))]
    pub(crate) key_metadata: Option<Vec<u8>>,
    /// field id: 132
    ///
    /// Split offsets for the file, for example all row group offsets in a
    /// Parquet file. Must be sorted ascending.
    #[builder(default, setter(strip_option))]
    pub(crate) split_offsets: Option<Vec<u64>>,
    /// field id: 140
    ///
    /// ID representing sort order for this file. Readers ignore it for
    /// position delete files.
    #[builder(default, setter(strip_option))]
    pub(crate) sort_order_id: Option<i32>,
    /// field id: 143
    ///
    /// Location of the single data file all deletes in a position delete
    /// file reference.
    #[builder(default, setter(strip_option, into))]
    pub(crate) referenced_data_file: Option<String>,
}

impl ContentFileBuilder {
    /// Builds the [`ContentFile`], checking its invariants.
    ///
    /// Fails with [`ErrorKind::DataInvalid`] when a required field is missing
    /// or the record breaks an invariant, see [`ContentFile::validate`].
    pub fn build(&self) -> Result<ContentFile> {
        let file = self.fallible_build()?;
        file.validate()?;
        Ok(file)
    }
}

impl ContentFile {
    /// Builder for a data file.
    pub fn data_builder() -> ContentFileBuilder {
        let mut builder = ContentFileBuilder::default();
        builder.content(FileContent::Data);
        builder
    }

    /// Builder for a position delete file.
    pub fn position_delete_builder() -> ContentFileBuilder {
        let mut builder = ContentFileBuilder::default();
        builder.content(FileContent::PositionDeletes);
        builder
    }

    /// Builder for an equality delete file comparing rows on `equality_ids`.
    pub fn equality_delete_builder(
        equality_ids: impl IntoIterator<Item = i32>,
    ) -> ContentFileBuilder {
        let mut builder = ContentFileBuilder::default();
        builder.content(FileContent::EqualityDeletes {
            equality_ids: equality_ids.into_iter().collect(),
        });
        builder
    }

    /// Ordinal position of the file in a manifest, or `None` if it was not
    /// read from a manifest.
    pub fn position(&self) -> Option<u64> {
        self.position
    }
    /// Id of the partition spec used for partition metadata.
    pub fn spec_id(&self) -> i32 {
        self.spec_id
    }
    /// Type of content stored in the file.
    pub fn content(&self) -> DataContentType {
        self.content.content_type()
    }
    /// Content of the file along with its variant-only data.
    pub fn file_content(&self) -> &FileContent {
        &self.content
    }
    /// Fully qualified path to the file.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
    /// Format of the file.
    pub fn file_format(&self) -> DataFileFormat {
        self.file_format
    }
    /// Partition of the file.
    pub fn partition(&self) -> &Struct {
        &self.partition
    }
    /// Number of top-level records in the file.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }
    /// File size in bytes.
    pub fn file_size_in_bytes(&self) -> u64 {
        self.file_size_in_bytes
    }
    /// If collected, map from column id to the size of the column in bytes.
    pub fn column_sizes(&self) -> Option<&HashMap<i32, u64>> {
        self.column_sizes.as_ref()
    }
    /// If collected, map from column id to the count of its values.
    pub fn value_counts(&self) -> Option<&HashMap<i32, u64>> {
        self.value_counts.as_ref()
    }
    /// If collected, map from column id to its null value count.
    pub fn null_value_counts(&self) -> Option<&HashMap<i32, u64>> {
        self.null_value_counts.as_ref()
    }
    /// If collected, map from column id to its NaN value count.
    pub fn nan_value_counts(&self) -> Option<&HashMap<i32, u64>> {
        self.nan_value_counts.as_ref()
    }
    /// If collected, map from column id to its encoded lower bound.
    pub fn lower_bounds(&self) -> Option<&HashMap<i32, Vec<u8>>> {
        self.lower_bounds.as_ref()
    }
    /// If collected, map from column id to its encoded upper bound.
    pub fn upper_bounds(&self) -> Option<&HashMap<i32, Vec<u8>>> {
        self.upper_bounds.as_ref()
    }
    /// Encryption key metadata, `None` if the file is stored in plain text.
    pub fn key_metadata(&self) -> Option<&[u8]> {
        self.key_metadata.as_deref()
    }
    /// Recommended split locations, sorted ascending, if applicable.
    pub fn split_offsets(&self) -> Option<&[u64]> {
        self.split_offsets.as_deref()
    }
    /// Field ids used for equality comparison in equality delete files.
    /// Empty for every other kind of file.
    pub fn equality_field_ids(&self) -> &[i32] {
        self.content.equality_ids()
    }
    /// Sort order id of the file.
    pub fn sort_order_id(&self) -> Option<i32> {
        self.sort_order_id
    }
    /// Data file referenced by all deletes of a position delete file.
    pub fn referenced_data_file(&self) -> Option<&str> {
        self.referenced_data_file.as_deref()
    }

    /// Returns true if the file holds table rows.
    pub fn is_data_file(&self) -> bool {
        matches!(self.content, FileContent::Data)
    }
    /// Returns true if the file holds deletes of either kind.
    pub fn is_delete_file(&self) -> bool {
        !self.is_data_file()
    }
    /// Returns true if the file is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.key_metadata.is_some()
    }

    /// Returns true if at least one statistics map was collected.
    pub fn has_stats(&self) -> bool {
        self.column_sizes.is_some()
            || self.value_counts.is_some()
            || self.null_value_counts.is_some()
            || self.nan_value_counts.is_some()
            || self.lower_bounds.is_some()
            || self.upper_bounds.is_some()
    }

    /// Copies this file, statistics included.
    ///
    /// The copy shares nothing with `self`, so it stays valid after the
    /// reader that produced `self` moves on.
    pub fn copy(&self) -> ContentFile {
        self.clone()
    }

    /// Copies this file without column sizes, value counts, null value
    /// counts, NaN value counts, lower bounds and upper bounds.
    ///
    /// All six come back as `None` whatever their state in `self`. Every
    /// other field, split offsets and equality ids included, is kept.
    pub fn copy_without_stats(&self) -> ContentFile {
        ContentFile {
            position: self.position,
            spec_id: self.spec_id,
            content: self.content.clone(),
            file_path: self.file_path.clone(),
            file_format: self.file_format,
            partition: self.partition.clone(),
            record_count: self.record_count,
            file_size_in_bytes: self.file_size_in_bytes,
            column_sizes: None,
            value_counts: None,
            null_value_counts: None,
            nan_value_counts: None,
            lower_bounds: None,
            upper_bounds: None,
            key_metadata: self.key_metadata.clone(),
            split_offsets: self.split_offsets.clone(),
            sort_order_id: self.sort_order_id,
            referenced_data_file: self.referenced_data_file.clone(),
        }
    }

    /// Checks the partition tuple against the arity of the partition type of
    /// `spec_id`, as resolved by the caller.
    pub fn ensure_partition_arity(&self, expected: usize) -> Result<()> {
        if self.partition.len() != expected {
            return Err(Error::new(
                ErrorKind::DataInvalid,
                format!(
                    "partition has {} fields but spec {} expects {expected}",
                    self.partition.len(),
                    self.spec_id
                ),
            )
            .with_context("file_path", &self.file_path));
        }
        Ok(())
    }

    /// Checks the record invariants:
    ///
    /// - the file path is not empty;
    /// - split offsets, when present, are sorted ascending. They are never
    ///   sorted here since planners rely on their order as given;
    /// - equality delete files list at least one equality id, without
    ///   duplicates;
    /// - only position delete files reference a data file.
    pub fn validate(&self) -> Result<()> {
        ensure_data_valid!(
            !self.file_path.is_empty(),
            "file path of {:?} file is empty",
            self.content()
        );

        if let Some(offsets) = &self.split_offsets {
            if let Some(idx) = offsets.windows(2).position(|w| w[0] > w[1]) {
                return Err(Error::new(
                    ErrorKind::DataInvalid,
                    "split offsets must be sorted ascending",
                )
                .with_context("file_path", &self.file_path)
                .with_context("index", (idx + 1).to_string())
                .with_context("split_offsets", format!("{offsets:?}")));
            }
        }

        if let FileContent::EqualityDeletes { equality_ids } = &self.content {
            ensure_data_valid!(
                !equality_ids.is_empty(),
                "equality delete file {} has no equality ids",
                self.file_path
            );
            let mut seen = equality_ids.clone();
            seen.sort_unstable();
            seen.dedup();
            ensure_data_valid!(
                seen.len() == equality_ids.len(),
                "equality delete file {} has duplicated equality ids {:?}",
                self.file_path,
                equality_ids
            );
        }

        if let Some(referenced) = &self.referenced_data_file {
            ensure_data_valid!(
                matches!(self.content, FileContent::PositionDeletes),
                "{:?} file {} references data file {}, only position delete files may",
                self.content(),
                self.file_path,
                referenced
            );
        }

        Ok(())
    }
}
