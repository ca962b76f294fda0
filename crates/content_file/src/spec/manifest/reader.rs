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

use super::_serde::RawContentFile;
use super::content_file::ContentFile;
use crate::error::Result;
use crate::spec::ContentFileReadOptions;

/// Reads content files of one manifest into a single reusable slot.
///
/// [`ContentFileReader::read`] overwrites the slot in place and hands out a
/// borrow of it, so a file can't be held across the next read. Keep files
/// with [`ContentFile::copy`] or [`ContentFile::copy_without_stats`].
///
/// ```rust
/// use iceberg_content_file::spec::{ContentFileReader, RawContentFile};
///
/// let raw = RawContentFile::from_json(
///     r#"{"file_path": "s3://b/t/data/a.parquet", "file_format": "parquet",
///         "record_count": 1, "file_size_in_bytes": 10}"#,
/// )
/// .unwrap();
/// let mut reader = ContentFileReader::new(0);
/// let kept = reader.read(&raw).unwrap().copy();
/// let _next = reader.read(&raw).unwrap();
/// assert_eq!(kept.position(), Some(0));
/// ```
#[derive(Debug)]
pub struct ContentFileReader {
    spec_id: i32,
    options: ContentFileReadOptions,
    next_position: u64,
    current: Option<ContentFile>,
}

impl ContentFileReader {
    /// Creates a reader for a manifest written with partition spec `spec_id`.
    pub fn new(spec_id: i32) -> Self {
        Self::with_options(spec_id, ContentFileReadOptions::default())
    }

    /// Creates a reader with explicit read options.
    pub fn with_options(spec_id: i32, options: ContentFileReadOptions) -> Self {
        Self {
            spec_id,
            options,
            next_position: 0,
            current: None,
        }
    }

    /// Read options of this reader.
    pub fn options(&self) -> &ContentFileReadOptions {
        &self.options
    }

    /// Decodes the next manifest entry into the reused slot.
    ///
    /// The entry gets the next ordinal position of the manifest, whether or
    /// not it decodes. On error the slot is cleared.
    pub fn read(&mut self, raw: &RawContentFile) -> Result<&ContentFile> {
        let position = self.next_position;
        self.next_position += 1;

        let decoded = match self.current.take() {
            Some(mut slot) => raw
                .decode_into(self.spec_id, Some(position), &mut slot)
                .map(|_| slot),
            None => raw.try_into_content_file(self.spec_id, Some(position)),
        };
        let checked = decoded.and_then(|file| {
            if self.options.validate_invariants {
                file.validate()?;
            }
            Ok(file)
        });

        match checked {
            Ok(file) => Ok(&*self.current.insert(file)),
            Err(e) => {
                log::debug!(
                    "Failed to read content file {} at position {position}: {e}",
                    raw.file_path
                );
                Err(e.with_context("position", position.to_string()))
            }
        }
    }

    /// Reads all `raws` and keeps each of them, with or without statistics
    /// according to [`ContentFileReadOptions::keep_stats`].
    pub fn read_all<'a>(
        &mut self,
        raws: impl IntoIterator<Item = &'a RawContentFile>,
    ) -> Result<Vec<ContentFile>> {
        let keep_stats = self.options.keep_stats;
        let mut files = Vec::new();
        for raw in raws {
            let file = self.read(raw)?;
            files.push(if keep_stats {
                file.copy()
            } else {
                file.copy_without_stats()
            });
        }
        Ok(files)
    }
}
