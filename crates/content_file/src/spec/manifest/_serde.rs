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

use serde_derive::{Deserialize, Serialize};

use super::content_file::{ContentFile, FileContent};
use super::content_type::DataContentType;
use crate::Error;
use crate::error::Result;
use crate::spec::Struct;

/// A content file the way a manifest reader decodes it, before any typing:
/// signed counts, numeric content id, format name, and key/value entry lists
/// for statistics.
///
/// A `None` statistics list means "not collected" and stays `None` once
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContentFile {
    /// Content type id, `0` for data files.
    #[serde(default)]
    pub content: i32,
    /// Full URI of the file.
    pub file_path: String,
    /// File format name, any case.
    pub file_format: String,
    /// Partition tuple, already resolved against its partition spec.
    #[serde(default)]
    pub partition: Struct,
    /// Number of records.
    pub record_count: i64,
    /// File size in bytes.
    pub file_size_in_bytes: i64,
    /// Column sizes entries.
    #[serde(default)]
    pub column_sizes: Option<Vec<I64Entry>>,
    /// Value counts entries.
    #[serde(default)]
    pub value_counts: Option<Vec<I64Entry>>,
    /// Null value counts entries.
    #[serde(default)]
    pub null_value_counts: Option<Vec<I64Entry>>,
    /// NaN value counts entries.
    #[serde(default)]
    pub nan_value_counts: Option<Vec<I64Entry>>,
    /// Lower bounds entries.
    #[serde(default)]
    pub lower_bounds: Option<Vec<BytesEntry>>,
    /// Upper bounds entries.
    #[serde(default)]
    pub upper_bounds: Option<Vec<BytesEntry>>,
    /// Encryption key metadata.
    #[serde(default)]
    pub key_metadata: Option<serde_bytes::ByteBuf>,
    /// Split offsets.
    #[serde(default)]
    pub split_offsets: Option<Vec<i64>>,
    /// Equality field ids.
    #[serde(default)]
    pub equality_ids: Option<Vec<i32>>,
    /// Sort order id.
    #[serde(default)]
    pub sort_order_id: Option<i32>,
    /// Data file referenced by position deletes.
    #[serde(default)]
    pub referenced_data_file: Option<String>,
}

/// Entry of a column id to count map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I64Entry {
    /// Column id.
    pub key: i32,
    /// Count, negative values are dropped when decoding.
    pub value: i64,
}

/// Entry of a column id to encoded bound map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BytesEntry {
    /// Column id.
    pub key: i32,
    /// Bound in single-value binary serialization.
    pub value: serde_bytes::ByteBuf,
}

impl RawContentFile {
    /// Parses a raw content file from its json form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes into a freshly allocated [`ContentFile`], without checking
    /// the record invariants.
    pub fn try_into_content_file(
        &self,
        spec_id: i32,
        position: Option<u64>,
    ) -> Result<ContentFile> {
        Ok(ContentFile {
            position,
            spec_id,
            content: self.file_content()?,
            file_path: self.file_path.clone(),
            file_format: self.file_format.parse()?,
            partition: self.partition.clone(),
            record_count: self.record_count.try_into()?,
            file_size_in_bytes: self.file_size_in_bytes.try_into()?,
            column_sizes: self
                .column_sizes
                .as_deref()
                .map(|v| parse_i64_entry(v, "column_sizes")),
            value_counts: self
                .value_counts
                .as_deref()
                .map(|v| parse_i64_entry(v, "value_counts")),
            null_value_counts: self
                .null_value_counts
                .as_deref()
                .map(|v| parse_i64_entry(v, "null_value_counts")),
            nan_value_counts: self
                .nan_value_counts
                .as_deref()
                .map(|v| parse_i64_entry(v, "nan_value_counts")),
            lower_bounds: self.lower_bounds.as_deref().map(parse_bytes_entry),
            upper_bounds: self.upper_bounds.as_deref().map(parse_bytes_entry),
            key_metadata: self.key_metadata.as_ref().map(|v| v.to_vec()),
            split_offsets: self
                .split_offsets
                .as_deref()
                .map(parse_split_offsets)
                .transpose()?,
            sort_order_id: self.sort_order_id,
            referenced_data_file: self.referenced_data_file.clone(),
        })
    }

    /// Decodes into `target`, overwriting every field and reusing the
    /// allocations `target` already holds. Without checking the record
    /// invariants.
    ///
    /// `target` is left untouched when decoding fails.
    pub(crate) fn decode_into(
        &self,
        spec_id: i32,
        position: Option<u64>,
        target: &mut ContentFile,
    ) -> Result<()> {
        let content = self.file_content()?;
        let file_format = self.file_format.parse()?;
        let record_count = self.record_count.try_into()?;
        let file_size_in_bytes = self.file_size_in_bytes.try_into()?;
        let split_offsets = self
            .split_offsets
            .as_deref()
            .map(parse_split_offsets)
            .transpose()?;

        target.position = position;
        target.spec_id = spec_id;
        target.content = content;
        target.file_path.clear();
        target.file_path.push_str(&self.file_path);
        target.file_format = file_format;
        target.partition.clone_from(&self.partition);
        target.record_count = record_count;
        target.file_size_in_bytes = file_size_in_bytes;
        refill_i64_entry(
            &mut target.column_sizes,
            self.column_sizes.as_deref(),
            "column_sizes",
        );
        refill_i64_entry(
            &mut target.value_counts,
            self.value_counts.as_deref(),
            "value_counts",
        );
        refill_i64_entry(
            &mut target.null_value_counts,
            self.null_value_counts.as_deref(),
            "null_value_counts",
        );
        refill_i64_entry(
            &mut target.nan_value_counts,
            self.nan_value_counts.as_deref(),
            "nan_value_counts",
        );
        refill_bytes_entry(&mut target.lower_bounds, self.lower_bounds.as_deref());
        refill_bytes_entry(&mut target.upper_bounds, self.upper_bounds.as_deref());
        match (&mut target.key_metadata, &self.key_metadata) {
            (Some(buf), Some(src)) => {
                buf.clear();
                buf.extend_from_slice(src);
            }
            (slot, src) => *slot = src.as_ref().map(|v| v.to_vec()),
        }
        target.split_offsets = split_offsets;
        target.sort_order_id = self.sort_order_id;
        target.referenced_data_file.clone_from(&self.referenced_data_file);
        Ok(())
    }

    fn file_content(&self) -> Result<FileContent> {
        FileContent::try_new(
            DataContentType::try_from(self.content)?,
            self.equality_ids.clone(),
        )
    }
}

impl TryFrom<&ContentFile> for RawContentFile {
    type Error = Error;

    fn try_from(file: &ContentFile) -> Result<Self> {
        Ok(Self {
            content: file.content() as i32,
            file_path: file.file_path.clone(),
            file_format: file.file_format.to_string().to_ascii_uppercase(),
            partition: file.partition.clone(),
            record_count: file.record_count.try_into()?,
            file_size_in_bytes: file.file_size_in_bytes.try_into()?,
            column_sizes: file.column_sizes.as_ref().map(to_i64_entry).transpose()?,
            value_counts: file.value_counts.as_ref().map(to_i64_entry).transpose()?,
            null_value_counts: file
                .null_value_counts
                .as_ref()
                .map(to_i64_entry)
                .transpose()?,
            nan_value_counts: file
                .nan_value_counts
                .as_ref()
                .map(to_i64_entry)
                .transpose()?,
            lower_bounds: file.lower_bounds.as_ref().map(to_bytes_entry),
            upper_bounds: file.upper_bounds.as_ref().map(to_bytes_entry),
            key_metadata: file.key_metadata.clone().map(serde_bytes::ByteBuf::from),
            split_offsets: file
                .split_offsets
                .as_ref()
                .map(|v| {
                    v.iter()
                        .map(|o| i64::try_from(*o).map_err(Error::from))
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?,
            equality_ids: match &file.content {
                FileContent::EqualityDeletes { equality_ids } => Some(equality_ids.clone()),
                _ => None,
            },
            sort_order_id: file.sort_order_id,
            referenced_data_file: file.referenced_data_file.clone(),
        })
    }
}

fn parse_split_offsets(offsets: &[i64]) -> Result<Vec<u64>> {
    offsets
        .iter()
        .map(|o| u64::try_from(*o).map_err(Error::from))
        .collect()
}

fn parse_i64_entry(v: &[I64Entry], name: &str) -> HashMap<i32, u64> {
    let mut m = HashMap::with_capacity(v.len());
    fill_i64_entry(&mut m, v, name);
    m
}

fn refill_i64_entry(target: &mut Option<HashMap<i32, u64>>, v: Option<&[I64Entry]>, name: &str) {
    match v {
        Some(v) => {
            let m = target.get_or_insert_with(HashMap::new);
            m.clear();
            fill_i64_entry(m, v, name);
        }
        None => *target = None,
    }
}

fn fill_i64_entry(m: &mut HashMap<i32, u64>, v: &[I64Entry], name: &str) {
    for entry in v {
        // Counts are never negative, such entries are dropped rather than
        // failing the whole file.
        match u64::try_from(entry.value) {
            Ok(value) => {
                m.insert(entry.key, value);
            }
            Err(_) => log::warn!(
                "Ignoring negative {name} entry for column {}: {}",
                entry.key,
                entry.value
            ),
        }
    }
}

fn parse_bytes_entry(v: &[BytesEntry]) -> HashMap<i32, Vec<u8>> {
    v.iter().map(|e| (e.key, e.value.to_vec())).collect()
}

fn refill_bytes_entry(target: &mut Option<HashMap<i32, Vec<u8>>>, v: Option<&[BytesEntry]>) {
    match v {
        Some(v) => {
            let m = target.get_or_insert_with(HashMap::new);
            m.clear();
            m.extend(v.iter().map(|e| (e.key, e.value.to_vec())));
        }
        None => *target = None,
    }
}

fn to_i64_entry(entries: &HashMap<i32, u64>) -> Result<Vec<I64Entry>> {
    let mut i64_entries = entries
        .iter()
        .map(|(k, v)| {
            Ok(I64Entry {
                key: *k,
                value: (*v).try_into()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    i64_entries.sort_by_key(|e| e.key);
    Ok(i64_entries)
}

fn to_bytes_entry(entries: &HashMap<i32, Vec<u8>>) -> Vec<BytesEntry> {
    let mut bytes_entries = entries
        .iter()
        .map(|(k, v)| BytesEntry {
            key: *k,
            value: serde_bytes::ByteBuf::from(v.clone()),
        })
        .collect::<Vec<_>>();
    bytes_entries.sort_by_key(|e| e.key);
    bytes_entries
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorKind;
    use crate::spec::{DataFileFormat, Literal};

    fn raw() -> RawContentFile {
        RawContentFile::from_json(
            r#"{
                "content": 2,
                "file_path": "s3://bucket/table/data/eq-00001.parquet",
                "file_format": "PARQUET",
                "partition": [{"Primitive": {"Int": 7}}, null],
                "record_count": 3,
                "file_size_in_bytes": 512,
                "value_counts": [{"key": 3, "value": 3}, {"key": 5, "value": -1}],
                "null_value_counts": [],
                "lower_bounds": [{"key": 7, "value": [1, 0, 0, 0]}],
                "key_metadata": [9, 9],
                "split_offsets": [4],
                "equality_ids": [3, 5]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_negative_entry_is_dropped() {
        let entries = vec![
            I64Entry { key: 1, value: -1 },
            I64Entry { key: 2, value: 3 },
        ];

        let ret = parse_i64_entry(&entries, "value_counts");

        assert_eq!(
            ret,
            HashMap::from([(2, 3)]),
            "Negative i64 entry should be ignored!"
        );
    }

    #[test]
    fn test_decode_raw_content_file() {
        let file = raw().try_into_content_file(4, Some(0)).unwrap();

        assert_eq!(file.position(), Some(0));
        assert_eq!(file.spec_id(), 4);
        assert_eq!(file.content(), DataContentType::EqualityDeletes);
        assert_eq!(file.equality_field_ids(), &[3, 5]);
        assert_eq!(file.file_format(), DataFileFormat::Parquet);
        assert_eq!(
            file.partition(),
            &Struct::from_iter([Some(Literal::int(7)), None])
        );
        assert_eq!(file.value_counts(), Some(&HashMap::from([(3, 3)])));
        assert_eq!(file.null_value_counts(), Some(&HashMap::new()));
        assert_eq!(file.column_sizes(), None);
        assert_eq!(
            file.lower_bounds(),
            Some(&HashMap::from([(7, vec![1, 0, 0, 0])]))
        );
        assert_eq!(file.upper_bounds(), None);
        assert_eq!(file.key_metadata(), Some([9u8, 9].as_slice()));
        assert_eq!(file.split_offsets(), Some([4u64].as_slice()));
    }

    #[test]
    fn test_decode_rejects_negative_record_count() {
        let mut raw = raw();
        raw.record_count = -1;
        let err = raw.try_into_content_file(0, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataInvalid);
    }

    #[test]
    fn test_decode_rejects_negative_split_offsets() {
        let mut raw = raw();
        raw.split_offsets = Some(vec![4, -1]);
        let err = raw.try_into_content_file(0, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataInvalid);

        let mut target = self::raw().try_into_content_file(0, Some(0)).unwrap();
        assert!(raw.decode_into(0, Some(1), &mut target).is_err());
        assert_eq!(target.split_offsets(), Some([4u64].as_slice()));
    }

    #[test]
    fn test_decode_rejects_equality_ids_on_data_file() {
        let mut raw = raw();
        raw.content = 0;
        assert!(raw.try_into_content_file(0, None).is_err());
    }

    #[test]
    fn test_decode_into_keeps_target_on_failure() {
        let mut target = raw().try_into_content_file(0, Some(0)).unwrap();
        let before = target.clone();

        let mut bad = raw();
        bad.file_format = "csv".to_string();
        assert!(bad.decode_into(0, Some(1), &mut target).is_err());
        assert_eq!(target, before);
    }

    #[test]
    fn test_raw_from_content_file() {
        let file = raw().try_into_content_file(4, None).unwrap();
        let back = RawContentFile::try_from(&file).unwrap();

        assert_eq!(back.content, 2);
        assert_eq!(back.file_format, "PARQUET");
        assert_eq!(back.value_counts, Some(vec![I64Entry { key: 3, value: 3 }]));
        assert_eq!(back.column_sizes, None);
        assert_eq!(back.try_into_content_file(4, None).unwrap(), file);
    }

    #[test]
    fn test_invalid_json() {
        let err = RawContentFile::from_json("{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataInvalid);
    }
}
