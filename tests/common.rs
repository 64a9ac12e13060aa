mod support;

use stdf_reader::{
    avec::{
        FromRecord, FromRecords,
        slice::{Entry, Error, Index, Records},
    },
    catalog::{Catalog, FieldSpec, RecordType},
    sans::{
        count::CountError,
        data::{Record, Value},
        endian::ByteOrderError,
        header::{ByteOrder, RecordHeader},
    },
};
use support::{Order, Stream};

fn decode<'c>(data: &[u8], catalog: &'c Catalog) -> Vec<Record<'c>> {
    Records::new(data, catalog)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn pcr(stream: Stream) -> Stream {
    let body = stream
        .body()
        .u1(1)
        .u1(2)
        .u4(0x0102_0304)
        .u4(5)
        .u4(6)
        .u4(7)
        .u4(8);
    stream.record(1, 30, body)
}

#[test]
fn decode_little_endian_stream() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::identified(Order::Little)).build();

    let records = Records::new(&data, &catalog).unwrap();
    assert_eq!(records.offset(), 0);

    let records = records.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].name, "FAR");
    assert_eq!(records[0].offset, 0);
    assert_eq!(records[0].fields["CPU_TYPE"], Value::U8(2));
    assert_eq!(records[0].fields["STDF_VER"], Value::U8(4));

    assert_eq!(records[1].name, "PCR");
    assert_eq!(records[1].offset, 6);
    assert_eq!(
        records[1].header,
        RecordHeader {
            length: 22,
            major: 1,
            minor: 30
        }
    );
    assert_eq!(records[1].fields["HEAD_NUM"], Value::U8(1));
    assert_eq!(records[1].fields["SITE_NUM"], Value::U8(2));
    assert_eq!(records[1].fields["PART_CNT"], Value::U32(0x0102_0304));
    assert_eq!(records[1].fields["FUNC_CNT"], Value::U32(8));
}

#[test]
fn decode_big_endian_stream() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::identified(Order::Big)).build();

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].fields["CPU_TYPE"], Value::U8(1));
    assert_eq!(records[1].header.length, 22);
    assert_eq!(records[1].fields["PART_CNT"], Value::U32(0x0102_0304));
    assert_eq!(records[1].fields["GOOD_CNT"], Value::U32(7));
}

#[test]
fn fields_keep_layout_order() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::identified(Order::Little)).build();

    let records = decode(&data, &catalog);
    let names: Vec<_> = records[1].fields.names().collect();

    assert_eq!(
        names,
        [
            "HEAD_NUM", "SITE_NUM", "PART_CNT", "RTST_CNT", "ABRT_CNT", "GOOD_CNT", "FUNC_CNT"
        ]
    );
}

#[test]
fn empty_stream_has_no_records() {
    let catalog = Catalog::v4();
    let mut records = Records::new(&[], &catalog).unwrap();
    assert!(records.next().is_none());
    assert!(records.next().is_none());
}

#[test]
fn stream_without_identification_defaults_to_little_endian() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::new(Order::Little)).build();

    assert_eq!(
        stdf_reader::sans::endian::detect(&data, &catalog),
        Ok(ByteOrder::Little)
    );

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields["PART_CNT"], Value::U32(0x0102_0304));
}

#[test]
fn invalid_cpu_type_is_fatal() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::new(Order::Little).far(3)).build();

    let err = Records::new(&data, &catalog).unwrap_err();
    assert_eq!(err, Error::ByteOrder(ByteOrderError::InvalidCpuType(3)));

    let err = Index::new(&data, &catalog).unwrap_err();
    assert_eq!(err, Error::ByteOrder(ByteOrderError::InvalidCpuType(3)));
}

#[test]
fn identification_without_cpu_type_is_fatal() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::new(Order::Little).record_with_length(0, 10, 0, &[])).build();

    assert_eq!(
        stdf_reader::sans::endian::detect(&data, &catalog),
        Err(ByteOrderError::MissingCpuType)
    );

    let err = Records::new(&data, &catalog).unwrap_err();
    assert_eq!(err, Error::ByteOrder(ByteOrderError::MissingCpuType));
}

#[test]
fn unknown_record_type_keeps_alignment() {
    let catalog = Catalog::v4();
    let stream = Stream::identified(Order::Little);
    let unknown = stream.body().raw(&[0xDE, 0xAD, 0xBE]);
    let pir = stream.body().u1(1).u1(7);
    let data = stream.record(99, 99, unknown).record(5, 10, pir).build();

    let records = decode(&data, &catalog);
    let names: Vec<_> = records.iter().map(|r| r.name).collect();
    assert_eq!(names, ["FAR", "UNK", "PIR"]);

    assert!(records[1].fields.is_empty());
    assert_eq!(records[1].header.length, 3);
    assert_eq!((records[1].header.major, records[1].header.minor), (99, 99));

    assert_eq!(records[2].offset, 6 + 7);
    assert_eq!(records[2].fields["SITE_NUM"], Value::U8(7));
}

#[test]
fn short_record_marks_remaining_fields_absent() {
    let catalog = Catalog::v4();
    let stream = Stream::identified(Order::Little);
    let short = stream.body().u1(1).u1(2).u4(3);
    let pir = stream.body().u1(4).u1(5);
    let data = stream.record(1, 30, short).record(5, 10, pir).build();

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 3);

    let pcr = &records[1].fields;
    assert_eq!(pcr.len(), 7);
    assert_eq!(pcr["PART_CNT"], Value::U32(3));
    for name in ["RTST_CNT", "ABRT_CNT", "GOOD_CNT", "FUNC_CNT"] {
        assert!(pcr[name].is_absent(), "{name} should be absent");
    }

    assert_eq!(records[2].name, "PIR");
    assert_eq!(records[2].fields["HEAD_NUM"], Value::U8(4));
    assert_eq!(records[2].fields["SITE_NUM"], Value::U8(5));
}

#[test]
fn decoding_stops_at_declared_length() {
    let catalog = Catalog::v4();
    let stream = Stream::identified(Order::Little);

    // A PIR declaring one byte, followed directly by another PIR.
    let data = stream
        .record_with_length(5, 10, 1, &[9])
        .record_with_length(5, 10, 2, &[3, 4])
        .build();

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 3);

    assert_eq!(records[1].fields["HEAD_NUM"], Value::U8(9));
    assert!(records[1].fields["SITE_NUM"].is_absent());

    assert_eq!(records[2].offset, 6 + 5);
    assert_eq!(records[2].fields["HEAD_NUM"], Value::U8(3));
    assert_eq!(records[2].fields["SITE_NUM"], Value::U8(4));
}

#[test]
fn trailing_partial_header_ends_stream() {
    let catalog = Catalog::v4();
    let data = Stream::identified(Order::Little).raw(&[1, 0, 5]).build();

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 1);
}

#[test]
fn truncated_final_body_is_decoded_as_far_as_it_goes() {
    let catalog = Catalog::v4();
    let data = Stream::identified(Order::Little)
        .record_with_length(1, 30, 22, &[1, 2, 3, 0])
        .build();

    let records = decode(&data, &catalog);
    assert_eq!(records.len(), 2);

    let pcr = &records[1].fields;
    assert_eq!(pcr["SITE_NUM"], Value::U8(2));
    assert_eq!(pcr["PART_CNT"], Value::U32(3));
    assert!(pcr["RTST_CNT"].is_absent());
}

#[test]
fn unmapped_array_is_fatal() {
    let mut catalog = Catalog::v4();
    catalog.insert(RecordType::owned(
        200,
        1,
        "XYZ",
        vec![
            FieldSpec::parse("CNT", "U1").unwrap(),
            FieldSpec::parse("ITEMS", "KxU1").unwrap(),
        ],
    ));

    let stream = Stream::identified(Order::Little);
    let body = stream.body().u1(1).u1(1);
    let data = pcr(stream.record(200, 1, body)).build();

    let mut records = Records::new(&data, &catalog).unwrap();
    assert_eq!(records.next().unwrap().unwrap().name, "FAR");

    let err = records.next().unwrap().unwrap_err();
    assert_eq!(
        err,
        Error::Count(CountError::Unmapped {
            record: "XYZ".into(),
            field: "ITEMS".into(),
        })
    );

    assert!(records.next().is_none());
}

#[test]
fn index_lists_names_and_offsets() {
    let catalog = Catalog::v4();
    let stream = Stream::identified(Order::Big);
    let pir = stream.body().u1(1).u1(1);
    let data = pcr(stream.record(99, 1, pir.clone()).record(5, 10, pir)).build();

    let index: Vec<_> = Index::new(&data, &catalog).unwrap().collect();

    assert_eq!(
        index,
        [
            Entry {
                name: "FAR",
                offset: 0
            },
            Entry {
                name: "UNK",
                offset: 6
            },
            Entry {
                name: "PIR",
                offset: 12
            },
            Entry {
                name: "PCR",
                offset: 18
            },
        ]
    );
}

#[derive(Default)]
struct Collector {
    names: Vec<String>,
    values: Vec<(String, Value)>,
    headers: usize,
}

impl FromRecords for Collector {
    fn add_record(&mut self, name: &str) -> Option<&mut dyn FromRecord> {
        self.names.push(name.to_string());
        (name == "PCR").then_some(self as _)
    }
}

impl FromRecord for Collector {
    fn add_header(&mut self, _: &RecordHeader) {
        self.headers += 1;
    }

    fn add_value(&mut self, field: &str, value: &Value) {
        self.values.push((field.to_string(), value.clone()));
    }
}

#[test]
fn decode_slice_publishes_to_receiver() {
    let catalog = Catalog::v4();
    let data = pcr(Stream::identified(Order::Little)).build();

    let mut collector = Collector::default();
    stdf_reader::avec::decode_slice(&data, &catalog, &mut collector).unwrap();

    assert_eq!(collector.names, ["FAR", "PCR"]);
    assert_eq!(collector.headers, 1);
    assert_eq!(collector.values.len(), 7);
    assert_eq!(
        collector.values[2],
        ("PART_CNT".to_string(), Value::U32(0x0102_0304))
    );
}
