#![allow(dead_code)]

use std::sync::OnceLock;

use protohash_schema::{
    DescriptorPool, DynamicMessage, FieldSchema, FileSchema, Kind, MapKey, MessageDescriptor,
    MessageSchema, Value,
};

pub const PKG: &str = "protohash.test";
pub const ALL_TYPES: &str = "protohash.test.TestAllTypes";
pub const NESTED_MESSAGE: &str = "protohash.test.TestAllTypes.NestedMessage";
pub const NESTED_ALL_TYPES: &str = "protohash.test.NestedTestAllTypes";
pub const NESTED_ENUM: &str = "protohash.test.TestAllTypes.NestedEnum";

pub const BAR: i32 = 1;
pub const BAZ: i32 = 2;

fn msg(name: &str) -> Kind {
    Kind::Message(name.to_string())
}

fn nested_enum() -> Kind {
    Kind::Enum(NESTED_ENUM.to_string())
}

/// Fields are declared out of number order on purpose.
pub fn pool() -> DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let all_types = MessageSchema::new("TestAllTypes")
            .oneof("nested_type")
            .field(FieldSchema::new("map_string_string", 61, Kind::String).map(Kind::String))
            .field(FieldSchema::new("map_uint64_string", 62, Kind::String).map(Kind::Uint64))
            .field(FieldSchema::new("map_int32_string", 63, Kind::String).map(Kind::Int32))
            .field(FieldSchema::new("map_bool_string", 64, Kind::String).map(Kind::Bool))
            .field(FieldSchema::new("map_int64_nested_type", 65, msg(NESTED_MESSAGE)).map(Kind::Int64))
            .field(FieldSchema::new("single_string", 14, Kind::String))
            .field(FieldSchema::new("single_int32", 1, Kind::Int32))
            .field(FieldSchema::new("single_int64", 2, Kind::Int64))
            .field(FieldSchema::new("single_uint32", 3, Kind::Uint32))
            .field(FieldSchema::new("single_uint64", 4, Kind::Uint64))
            .field(FieldSchema::new("single_sint32", 5, Kind::Sint32))
            .field(FieldSchema::new("single_sint64", 6, Kind::Sint64))
            .field(FieldSchema::new("single_fixed32", 7, Kind::Fixed32))
            .field(FieldSchema::new("single_fixed64", 8, Kind::Fixed64))
            .field(FieldSchema::new("single_sfixed32", 9, Kind::Sfixed32))
            .field(FieldSchema::new("single_sfixed64", 10, Kind::Sfixed64))
            .field(FieldSchema::new("single_float", 11, Kind::Float))
            .field(FieldSchema::new("single_double", 12, Kind::Double))
            .field(FieldSchema::new("single_bool", 13, Kind::Bool))
            .field(FieldSchema::new("single_bytes", 15, Kind::Bytes))
            .field(
                FieldSchema::new("single_nested_message", 21, msg(NESTED_MESSAGE))
                    .in_oneof("nested_type"),
            )
            .field(FieldSchema::new("single_nested_enum", 22, nested_enum()).in_oneof("nested_type"))
            .field(FieldSchema::new("standalone_enum", 23, nested_enum()))
            .field(FieldSchema::new("optional_int32", 24, Kind::Int32).optional())
            .field(FieldSchema::new("optional_string", 25, Kind::String).optional())
            .field(FieldSchema::new("repeated_int32", 31, Kind::Int32).repeated())
            .field(FieldSchema::new("repeated_int64", 32, Kind::Int64).repeated())
            .field(FieldSchema::new("repeated_uint32", 33, Kind::Uint32).repeated())
            .field(FieldSchema::new("repeated_uint64", 34, Kind::Uint64).repeated())
            .field(FieldSchema::new("repeated_sint32", 35, Kind::Sint32).repeated())
            .field(FieldSchema::new("repeated_sint64", 36, Kind::Sint64).repeated())
            .field(FieldSchema::new("repeated_fixed32", 37, Kind::Fixed32).repeated())
            .field(FieldSchema::new("repeated_fixed64", 38, Kind::Fixed64).repeated())
            .field(FieldSchema::new("repeated_sfixed32", 39, Kind::Sfixed32).repeated())
            .field(FieldSchema::new("repeated_sfixed64", 40, Kind::Sfixed64).repeated())
            .field(FieldSchema::new("repeated_float", 41, Kind::Float).repeated())
            .field(FieldSchema::new("repeated_double", 42, Kind::Double).repeated())
            .field(FieldSchema::new("repeated_bool", 43, Kind::Bool).repeated())
            .field(FieldSchema::new("repeated_string", 44, Kind::String).repeated())
            .field(FieldSchema::new("repeated_bytes", 45, Kind::Bytes).repeated())
            .field(FieldSchema::new("repeated_nested_message", 48, msg(NESTED_MESSAGE)).repeated())
            .field(FieldSchema::new("repeated_nested_enum", 49, nested_enum()).repeated())
            .message(MessageSchema::new("NestedMessage").field(FieldSchema::new("bb", 1, Kind::Int32)));

        let nested_all_types = MessageSchema::new("NestedTestAllTypes")
            .field(FieldSchema::new("payload", 2, msg(ALL_TYPES)))
            .field(FieldSchema::new("child", 1, msg(NESTED_ALL_TYPES)));

        DescriptorPool::build([FileSchema::new(PKG)
            .message(all_types)
            .message(nested_all_types)])
        .expect("test schema is valid")
    })
    .clone()
}

pub fn descriptor(name: &str) -> MessageDescriptor {
    pool().message(name).expect("message type exists")
}

pub fn all_types() -> DynamicMessage {
    DynamicMessage::new(descriptor(ALL_TYPES))
}

pub fn nested_message(bb: i32) -> DynamicMessage {
    DynamicMessage::new(descriptor(NESTED_MESSAGE))
        .with("bb", bb)
        .unwrap()
}

pub fn map<K: Into<MapKey>, V: Into<Value>>(entries: Vec<(K, V)>) -> Value {
    entries.into_iter().collect()
}

/// Every field kind populated.
pub fn full_message() -> DynamicMessage {
    let mut m = all_types();
    m.set("single_int32", 42i32).unwrap();
    m.set("single_int64", 42i64).unwrap();
    m.set("single_uint32", 42u32).unwrap();
    m.set("single_uint64", 42u64).unwrap();
    m.set("single_sint32", 42i32).unwrap();
    m.set("single_sint64", 42i64).unwrap();
    m.set("single_fixed32", 42u32).unwrap();
    m.set("single_fixed64", 42u64).unwrap();
    m.set("single_sfixed32", 42i32).unwrap();
    m.set("single_sfixed64", 42i64).unwrap();
    m.set("single_float", 42.42f32).unwrap();
    m.set("single_double", 42.42f64).unwrap();
    m.set("single_bool", true).unwrap();
    m.set("single_string", "wibble wobble").unwrap();
    m.set("single_bytes", b"wibble wobble".to_vec()).unwrap();
    m.set("standalone_enum", Value::EnumNumber(BAZ)).unwrap();
    m.set("single_nested_message", nested_message(42)).unwrap();
    m.set("repeated_int32", Value::list([1i32, 2, 3])).unwrap();
    m.set("repeated_int64", Value::list([1i64, 2, 3])).unwrap();
    m.set("repeated_uint32", Value::list([1u32, 2, 3])).unwrap();
    m.set("repeated_uint64", Value::list([1u64, 2, 3])).unwrap();
    m.set("repeated_sint32", Value::list([1i32, 2, 3])).unwrap();
    m.set("repeated_sint64", Value::list([1i64, 2, 3])).unwrap();
    m.set("repeated_fixed32", Value::list([1u32, 2, 3])).unwrap();
    m.set("repeated_fixed64", Value::list([1u64, 2, 3])).unwrap();
    m.set("repeated_sfixed32", Value::list([1i32, 2, 3])).unwrap();
    m.set("repeated_sfixed64", Value::list([1i64, 2, 3])).unwrap();
    m.set("repeated_float", Value::list([1.2f32, 2.3, 3.4])).unwrap();
    m.set("repeated_double", Value::list([1.2f64, 2.3, 3.4])).unwrap();
    m.set("repeated_bool", Value::list([true, false, true])).unwrap();
    m.set("repeated_string", Value::list(["wibble", "wobble", "flub"]))
        .unwrap();
    m.set(
        "repeated_bytes",
        Value::list([b"wibble".to_vec(), b"wobble".to_vec(), b"flub".to_vec()]),
    )
    .unwrap();
    m.set(
        "repeated_nested_message",
        Value::list([nested_message(1), nested_message(2), nested_message(3)]),
    )
    .unwrap();
    m.set(
        "repeated_nested_enum",
        Value::List(vec![Value::EnumNumber(BAR), Value::EnumNumber(BAZ)]),
    )
    .unwrap();
    m.set("map_string_string", map(vec![("a", "b"), ("c", "d"), ("e", "f")]))
        .unwrap();
    m.set("map_uint64_string", map(vec![(1u64, "a"), (2, "b"), (3, "c")]))
        .unwrap();
    m.set("map_int32_string", map(vec![(1i32, "a"), (2, "b"), (3, "c")]))
        .unwrap();
    m.set("map_bool_string", map(vec![(true, "a"), (false, "b")]))
        .unwrap();
    m.set("map_int64_nested_type", map(vec![(1i64, nested_message(1))]))
        .unwrap();
    m
}

/// A chain of `depth` NestedTestAllTypes, each carrying a full payload.
pub fn nested_all_types(depth: usize) -> DynamicMessage {
    let mut m = DynamicMessage::new(descriptor(NESTED_ALL_TYPES));
    m.set("payload", full_message()).unwrap();
    if depth > 1 {
        m.set("child", nested_all_types(depth - 1)).unwrap();
    }
    m
}
