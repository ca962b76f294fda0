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

//! Copy and invariant behavior of content files.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use iceberg_content_file::spec::{
    ContentFile, ContentFileReader, DataContentType, DataFileFormat, Literal, RawContentFile,
    Struct,
};
use pretty_assertions::assert_eq;

fn assert_same_identity(copy: &ContentFile, file: &ContentFile) {
    assert_eq!(copy.position(), file.position());
    assert_eq!(copy.spec_id(), file.spec_id());
    assert_eq!(copy.content(), file.content());
    assert_eq!(copy.file_path(), file.file_path());
    assert_eq!(copy.file_format(), file.file_format());
    assert_eq!(copy.partition(), file.partition());
    assert_eq!(copy.record_count(), file.record_count());
    assert_eq!(copy.file_size_in_bytes(), file.file_size_in_bytes());
    assert_eq!(copy.key_metadata(), file.key_metadata());
    assert_eq!(copy.split_offsets(), file.split_offsets());
    assert_eq!(copy.equality_field_ids(), file.equality_field_ids());
}

fn assert_no_stats(file: &ContentFile) {
    assert_eq!(file.column_sizes(), None);
    assert_eq!(file.value_counts(), None);
    assert_eq!(file.null_value_counts(), None);
    assert_eq!(file.nan_value_counts(), None);
    assert_eq!(file.lower_bounds(), None);
    assert_eq!(file.upper_bounds(), None);
}

fn assert_split_offsets_sorted(file: &ContentFile) {
    if let Some(offsets) = file.split_offsets() {
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }
}

fn fixtures() -> Vec<ContentFile> {
    let partition = Struct::from_iter([Some(Literal::string("2024-01-01"))]);
    vec![
        ContentFile::data_builder()
            .spec_id(1)
            .file_path("s3://bucket/t/data/d1.parquet")
            .file_format(DataFileFormat::Parquet)
            .partition(partition.clone())
            .record_count(10)
            .file_size_in_bytes(100)
            .column_sizes(HashMap::from([(1, 50)]))
            .nan_value_counts(HashMap::new())
            .split_offsets(vec![4])
            .build()
            .unwrap(),
        ContentFile::position_delete_builder()
            .spec_id(1)
            .file_path("s3://bucket/t/data/pos.parquet")
            .file_format(DataFileFormat::Parquet)
            .partition(partition.clone())
            .record_count(2)
            .file_size_in_bytes(64)
            .value_counts(HashMap::from([(2147483546, 2), (2147483545, 2)]))
            .referenced_data_file("s3://bucket/t/data/d1.parquet")
            .build()
            .unwrap(),
        ContentFile::equality_delete_builder([3])
            .spec_id(1)
            .file_path("s3://bucket/t/data/eq.avro")
            .file_format(DataFileFormat::Avro)
            .partition(partition)
            .record_count(1)
            .file_size_in_bytes(32)
            .key_metadata(vec![1, 2, 3])
            .build()
            .unwrap(),
    ]
}

#[test]
fn test_copy_preserves_every_field() {
    for file in fixtures() {
        let copy = file.copy();
        assert_eq!(copy, file);
        assert_same_identity(&copy, &file);
        assert_eq!(copy.column_sizes(), file.column_sizes());
        assert_eq!(copy.value_counts(), file.value_counts());
        assert_eq!(copy.null_value_counts(), file.null_value_counts());
        assert_eq!(copy.nan_value_counts(), file.nan_value_counts());
        assert_eq!(copy.lower_bounds(), file.lower_bounds());
        assert_eq!(copy.upper_bounds(), file.upper_bounds());
    }
}

#[test]
fn test_copy_without_stats_keeps_identity() {
    for file in fixtures() {
        let copy = file.copy_without_stats();
        assert_no_stats(&copy);
        assert_same_identity(&copy, &file);
    }
}

#[test]
fn test_equality_ids_follow_content() {
    for file in fixtures() {
        assert_split_offsets_sorted(&file);
        if file.content() == DataContentType::EqualityDeletes {
            assert!(!file.equality_field_ids().is_empty());
        } else {
            assert!(file.equality_field_ids().is_empty());
        }
    }
}

#[test]
fn test_data_file_without_stats() {
    let file = ContentFile::data_builder()
        .spec_id(0)
        .file_path("s3://bucket/t/data/00000-0.parquet")
        .file_format(DataFileFormat::Parquet)
        .partition(Struct::empty())
        .record_count(100)
        .file_size_in_bytes(2048)
        .split_offsets(vec![0, 512, 1024, 1536])
        .build()
        .unwrap();

    assert_no_stats(&file);
    let offsets = [0u64, 512, 1024, 1536];
    assert_eq!(file.copy().split_offsets(), Some(offsets.as_slice()));
    assert_eq!(
        file.copy_without_stats().split_offsets(),
        Some(offsets.as_slice())
    );
    assert_no_stats(&file.copy());
}

#[test]
fn test_equality_delete_with_extra_column() {
    let file = ContentFile::equality_delete_builder([3, 5])
        .spec_id(0)
        .file_path("s3://bucket/t/data/eq-deletes.parquet")
        .file_format(DataFileFormat::Parquet)
        .partition(Struct::empty())
        .record_count(4)
        .file_size_in_bytes(256)
        .lower_bounds(HashMap::from([(7, vec![0x01])]))
        .upper_bounds(HashMap::from([(7, vec![0x09])]))
        .build()
        .unwrap();

    assert_eq!(file.equality_field_ids(), &[3, 5]);

    let copy = file.copy();
    assert_eq!(copy.equality_field_ids(), &[3, 5]);
    assert_eq!(copy.lower_bounds().unwrap().get(&7), Some(&vec![0x01]));
    assert_eq!(copy.upper_bounds().unwrap().get(&7), Some(&vec![0x09]));

    let slim = file.copy_without_stats();
    assert_eq!(slim.equality_field_ids(), &[3, 5]);
    assert_eq!(slim.lower_bounds(), None);
    assert_eq!(slim.upper_bounds(), None);
}

#[test]
fn test_copies_are_independent_of_reused_slot() {
    let first = RawContentFile::from_json(
        r#"{
            "file_path": "s3://bucket/t/data/a.parquet",
            "file_format": "parquet",
            "record_count": 1,
            "file_size_in_bytes": 10,
            "lower_bounds": [{"key": 1, "value": [1]}],
            "key_metadata": [7]
        }"#,
    )
    .unwrap();
    let second = RawContentFile::from_json(
        r#"{
            "file_path": "s3://bucket/t/data/b.parquet",
            "file_format": "orc",
            "record_count": 2,
            "file_size_in_bytes": 20,
            "lower_bounds": [{"key": 1, "value": [2]}, {"key": 2, "value": [3]}],
            "key_metadata": [8]
        }"#,
    )
    .unwrap();

    let mut reader = ContentFileReader::new(0);
    let full = reader.read(&first).unwrap().copy();
    let slim = reader.read(&first).unwrap().copy_without_stats();
    let reused = reader.read(&second).unwrap();

    assert_eq!(reused.file_path(), "s3://bucket/t/data/b.parquet");
    assert_eq!(reused.lower_bounds().map(|b| b.len()), Some(2));

    assert_eq!(full.file_path(), "s3://bucket/t/data/a.parquet");
    assert_eq!(full.file_format(), DataFileFormat::Parquet);
    assert_eq!(full.position(), Some(0));
    assert_eq!(full.lower_bounds(), Some(&HashMap::from([(1, vec![1u8])])));
    assert_eq!(full.key_metadata(), Some([7u8].as_slice()));

    assert_eq!(slim.position(), Some(1));
    assert_eq!(slim.record_count(), 1);
    assert_eq!(slim.key_metadata(), Some([7u8].as_slice()));
    assert_eq!(slim.lower_bounds(), None);
}

#[test]
fn test_reused_slot_drops_fields_absent_from_next_entry() {
    let full = RawContentFile::from_json(
        r#"{
            "content": 2,
            "file_path": "s3://bucket/t/data/eq.parquet",
            "file_format": "parquet",
            "partition": [{"Primitive": {"Int": 7}}],
            "record_count": 3,
            "file_size_in_bytes": 512,
            "column_sizes": [{"key": 1, "value": 100}],
            "value_counts": [{"key": 1, "value": 3}],
            "null_value_counts": [{"key": 1, "value": 0}],
            "nan_value_counts": [{"key": 1, "value": 0}],
            "lower_bounds": [{"key": 1, "value": [1]}],
            "upper_bounds": [{"key": 1, "value": [9]}],
            "key_metadata": [7, 7],
            "split_offsets": [4, 128],
            "equality_ids": [1],
            "sort_order_id": 2
        }"#,
    )
    .unwrap();
    let bare = RawContentFile::from_json(
        r#"{
            "content": 0,
            "file_path": "s3://bucket/t/data/bare.orc",
            "file_format": "orc",
            "record_count": 5,
            "file_size_in_bytes": 64,
            "column_sizes": []
        }"#,
    )
    .unwrap();

    let mut reader = ContentFileReader::new(0);
    let first = reader.read(&full).unwrap().copy();
    assert_eq!(first.content(), DataContentType::EqualityDeletes);
    assert_eq!(first.key_metadata(), Some([7u8, 7].as_slice()));
    assert_eq!(first.split_offsets(), Some([4u64, 128].as_slice()));
    assert_eq!(first.sort_order_id(), Some(2));
    assert_eq!(first.upper_bounds(), Some(&HashMap::from([(1, vec![9u8])])));

    let file = reader.read(&bare).unwrap();

    assert_eq!(file.position(), Some(1));
    assert_eq!(file.content(), DataContentType::Data);
    assert_eq!(file.equality_field_ids(), &[] as &[i32]);
    assert_eq!(file.file_path(), "s3://bucket/t/data/bare.orc");
    assert_eq!(file.file_format(), DataFileFormat::Orc);
    assert_eq!(file.partition(), &Struct::empty());
    assert_eq!(file.record_count(), 5);
    assert_eq!(file.file_size_in_bytes(), 64);
    assert_eq!(file.column_sizes(), Some(&HashMap::new()));
    assert_eq!(file.value_counts(), None);
    assert_eq!(file.null_value_counts(), None);
    assert_eq!(file.nan_value_counts(), None);
    assert_eq!(file.lower_bounds(), None);
    assert_eq!(file.upper_bounds(), None);
    assert_eq!(file.key_metadata(), None);
    assert!(!file.is_encrypted());
    assert_eq!(file.split_offsets(), None);
    assert_eq!(file.sort_order_id(), None);
    assert_eq!(file.referenced_data_file(), None);
}

#[test]
fn test_copies_can_be_shared_across_threads() {
    let files: Arc<Vec<ContentFile>> = Arc::new(fixtures().iter().map(ContentFile::copy).collect());

    let handles = (0..4)
        .map(|_| {
            let files = Arc::clone(&files);
            thread::spawn(move || files.iter().map(|f| f.record_count()).sum::<u64>())
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 13);
    }
}
