use codec::SszCodec;
use schema::{Schema, Value, BASIC_UINT_BITS, UINT_BITS};
use vectors::{
    uint_max, valid_case, GenLimits, Generator, RenderedValue, SuiteId, TestCase, TestSuite,
    TypeDescriptor,
};

fn generate(id: SuiteId) -> TestSuite {
    Generator::new(GenLimits::for_testing())
        .unwrap()
        .generate(id, 0)
        .unwrap()
}

fn find_uint_case<'a>(suite: &'a TestSuite, bits: u16, value: &str) -> &'a TestCase {
    suite
        .test_cases
        .iter()
        .find(|case| {
            case.type_descriptor() == &TypeDescriptor::UInt(bits)
                && case.value() == Some(&RenderedValue::Decimal(value.to_string()))
        })
        .unwrap_or_else(|| panic!("no uint{bits} case with value {value}"))
}

#[test]
fn uint_edges_serialize_to_zero_and_ff_bytes() {
    let basic = generate(SuiteId::UInt);
    let bounds = generate(SuiteId::UIntBounds);

    for (suite, widths) in [(&basic, BASIC_UINT_BITS), (&bounds, UINT_BITS)] {
        for &bits in widths {
            let len = usize::from(bits / 8);
            let zero = find_uint_case(suite, bits, "0");
            assert!(zero.is_valid());
            assert_eq!(zero.serial(), Some(&vec![0x00; len][..]));

            let max = find_uint_case(suite, bits, &uint_max(bits).to_string());
            assert!(max.is_valid());
            assert_eq!(max.serial(), Some(&vec![0xFF; len][..]));
        }
    }
}

#[test]
fn bool_values_serialize_to_single_bytes() {
    let suite = generate(SuiteId::BoolValues);
    assert_eq!(suite.test_cases.len(), 2);

    let true_case = &suite.test_cases[0];
    assert_eq!(true_case.value(), Some(&RenderedValue::Bool(true)));
    assert_eq!(true_case.serial(), Some(&[0x01][..]));
    assert!(true_case.has_tag("true"));

    let false_case = &suite.test_cases[1];
    assert_eq!(false_case.value(), Some(&RenderedValue::Bool(false)));
    assert_eq!(false_case.serial(), Some(&[0x00][..]));
    assert!(false_case.has_tag("false"));
}

#[test]
fn bool_boundary_cases_are_all_invalid() {
    let wrong_length = generate(SuiteId::BoolWrongLength);
    assert!(!wrong_length.test_cases.is_empty());
    for case in &wrong_length.test_cases {
        assert!(!case.is_valid());
        assert_ne!(case.serial().map(<[u8]>::len), Some(1));
        assert!(case.has_tag("wrong_length"));
    }

    let invalid_byte = generate(SuiteId::BoolInvalidByte);
    for case in &invalid_byte.test_cases {
        let serial = case.serial().unwrap();
        assert!(!case.is_valid());
        assert_eq!(serial.len(), 1);
        assert!(serial[0] > 0x01);
    }
}

#[test]
fn uint_out_of_range_values_are_invalid() {
    let suite = generate(SuiteId::UIntBounds);
    for &bits in UINT_BITS {
        let underflow = find_uint_case(&suite, bits, "-1");
        assert!(!underflow.is_valid());
        assert!(underflow.serial().is_none());
        assert!(underflow.has_tag("uint_underflow"));

        let overflow_value = (uint_max(bits) + 1u8).to_string();
        let overflow = find_uint_case(&suite, bits, &overflow_value);
        assert!(!overflow.is_valid());
        assert!(overflow.serial().is_none());
        assert!(overflow.has_tag("uint_overflow"));
    }
}

#[test]
fn uint16_wrong_length_has_short_and_long_serials() {
    let suite = generate(SuiteId::UIntWrongLength);
    let uint16: Vec<&TestCase> = suite
        .test_cases
        .iter()
        .filter(|case| case.type_descriptor() == &TypeDescriptor::UInt(16))
        .collect();

    for len in [1, 4] {
        let case = uint16
            .iter()
            .find(|case| case.serial().map(<[u8]>::len) == Some(len))
            .unwrap_or_else(|| panic!("no uint16 serial of length {len}"));
        assert!(!case.is_valid());
        assert!(case.has_tag("wrong_length"));
    }
    assert!(uint16.iter().all(|case| case.serial().map(<[u8]>::len) != Some(2)));
}

#[test]
fn rendered_records_satisfy_validity_invariant() {
    for id in SuiteId::ALL {
        let suite = generate(id);
        let document: serde_json::Value = serde_json::from_str(&suite.to_json().unwrap()).unwrap();
        for record in document["test_cases"].as_array().unwrap() {
            let valid = record["valid"].as_bool().unwrap();
            let has_value = record.get("value").is_some();
            let has_serial = record.get("ssz").is_some();
            if valid {
                assert!(has_value && has_serial, "{id}: valid record missing parts");
            } else {
                assert!(!(has_value && has_serial), "{id}: invalid record has both parts");
            }
            assert!(record["tags"].is_array());
        }
    }
}

#[test]
fn descriptors_and_values_correspond_positionally() {
    for id in [
        SuiteId::FlatList,
        SuiteId::FlatContainer,
        SuiteId::FlatVector,
        SuiteId::NestedShallow,
        SuiteId::NestedDeep,
    ] {
        for case in &generate(id).test_cases {
            let value = case.value().unwrap();
            assert!(
                case.type_descriptor().conforms(value),
                "{id}: value does not match {:?}",
                case.type_descriptor()
            );
        }
    }
}

#[test]
fn same_seed_reproduces_documents() {
    let mut first = Generator::new(GenLimits::for_testing()).unwrap();
    let mut second = Generator::new(GenLimits::for_testing()).unwrap();

    for id in SuiteId::ALL {
        let a = first.generate(id, 42).unwrap();
        let b = second.generate(id, 42).unwrap();
        let again = first.generate(id, 42).unwrap();
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap(), "{id}");
        assert_eq!(a.digest().unwrap(), again.digest().unwrap(), "{id}");
    }
}

#[test]
fn different_seeds_change_random_suites() {
    let mut generator = Generator::new(GenLimits::for_testing()).unwrap();
    let a = generator.generate(SuiteId::UIntRandom, 1).unwrap();
    let b = generator.generate(SuiteId::UIntRandom, 2).unwrap();
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn generation_leaves_random_state_untouched() {
    let mut generator = Generator::new(GenLimits::for_testing()).unwrap();
    for id in SuiteId::ALL {
        let before = generator.rng().clone();
        generator.generate(id, 7).unwrap();
        assert_eq!(generator.rng(), &before, "{id} leaked random state");
    }
}

#[test]
fn empty_uint8_list_encodes_to_empty_serial() {
    let suite = generate(SuiteId::FlatList);
    let list_of_uint8 = TypeDescriptor::List(Box::new(TypeDescriptor::UInt(8)));
    let empty = suite
        .test_cases
        .iter()
        .find(|case| {
            case.type_descriptor() == &list_of_uint8
                && case.value() == Some(&RenderedValue::Sequence(Vec::new()))
        })
        .unwrap();

    assert!(empty.is_valid());
    assert_eq!(empty.serial(), Some(&[][..]));

    let record = serde_json::to_value(empty).unwrap();
    assert_eq!(record["ssz"], "0x");
}

#[test]
fn uint8_vector_encodes_elements_in_order() {
    let schema = Schema::vector(Schema::UInt { bits: 8 }, 3);
    let value = Value::Sequence(vec![Value::int(1), Value::int(2), Value::int(255)]);
    let case = valid_case(&SszCodec::new(), &schema, &value, &["composite", "vector"]).unwrap();

    assert!(case.is_valid());
    assert_eq!(case.serial(), Some(&[0x01, 0x02, 0xFF][..]));
    let record = serde_json::to_value(&case).unwrap();
    assert_eq!(record["ssz"], "0x0102ff");
    assert_eq!(record["type"], serde_json::json!(["uint8", 3]));
}

#[test]
fn default_limits_generate_reference_sizes() {
    let mut generator = Generator::new(GenLimits::default()).unwrap();
    let bool_invalid = generator.generate(SuiteId::BoolInvalidByte, 0).unwrap();
    assert_eq!(bool_invalid.test_cases.len(), 253);

    let shallow = generator.generate(SuiteId::NestedShallow, 0).unwrap();
    assert_eq!(shallow.test_cases.len(), 9 * 20);

    let deep = generator.generate(SuiteId::NestedDeep, 0).unwrap();
    assert_eq!(deep.test_cases.len(), 20);
}

#[test]
fn flat_list_edges_collapse_for_wide_elements() {
    let limits = GenLimits::for_testing();
    let suite = generate(SuiteId::FlatList);
    // A 16-byte budget leaves no room for one uint256 element, so only the
    // lengths 0 and 1 remain before the random ones.
    let list_of_uint256 = TypeDescriptor::List(Box::new(TypeDescriptor::UInt(256)));
    let cases: Vec<&TestCase> = suite
        .test_cases
        .iter()
        .filter(|case| case.type_descriptor() == &list_of_uint256)
        .collect();
    assert_eq!(cases.len(), 2 + limits.flat_random_lengths);

    let edge_lengths: Vec<usize> = cases[..2]
        .iter()
        .map(|case| match case.value() {
            Some(RenderedValue::Sequence(items)) => items.len(),
            other => panic!("unexpected value {other:?}"),
        })
        .collect();
    assert_eq!(edge_lengths, vec![0, 1]);
}
