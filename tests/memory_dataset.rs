//! Public API behaviour on the in-memory engine.

mod common;

use common::{init_tracing, ramp};
use ncaccess::{
    get_array, Dataset, ElementType, Engine, Error, MemoryEngine, Owner, Status, StoredType,
};

fn five() -> (Dataset<MemoryEngine>, ncaccess::Variable) {
    init_tracing();
    let mut ds = Dataset::in_memory();
    ds.add_dimension("n", 5).unwrap();
    let var = ds.add_variable::<f64>("v", &["n"]).unwrap();
    (ds, var)
}

#[test]
fn write_then_read_returns_same_values() {
    let (mut ds, var) = five();
    ds.write_array(&var, &[10.0, 11.0, 12.0, 13.0, 14.0]).unwrap();
    let mut out = [0.0; 5];
    ds.read_array(&var, &mut out).unwrap();
    assert_eq!(out, [10.0, 11.0, 12.0, 13.0, 14.0]);
}

#[test]
fn wrong_lengths_fail_without_side_effects() {
    let (mut ds, var) = five();
    ds.write_array(&var, &ramp(5)).unwrap();

    for len in [0, 1, 3, 4, 6, 10] {
        let data = vec![-1.0; len];
        assert!(ds.write_array(&var, &data).unwrap_err().is_mismatch());

        let mut buffer = vec![-1.0; len];
        assert!(ds.read_array(&var, &mut buffer).unwrap_err().is_mismatch());
        assert!(buffer.iter().all(|v| *v == -1.0));
    }
    assert_eq!(ds.get_array::<f64>(&var).unwrap(), ramp(5));
}

#[test]
fn units_attribute_scenario() {
    let (mut ds, var) = five();
    let units = var.attribute("units");
    ds.write_attribute(&units, &[1.5f64]).unwrap();

    let mut one = [0.0; 1];
    ds.read_attribute(&units, &mut one).unwrap();
    assert_eq!(one, [1.5]);

    let mut two = [0.0; 2];
    let err = ds.read_attribute(&units, &mut two).unwrap_err();
    assert!(matches!(
        err,
        Error::TypeOrLengthMismatch {
            stored_type: StoredType::Numeric(ElementType::F64),
            stored_len: 1,
            buffer_type: ElementType::F64,
            buffer_len: 2,
        }
    ));
}

#[test]
fn attribute_may_be_retyped_by_overwrite() {
    let (mut ds, _) = five();
    let fill = ds.attribute("fill");
    ds.write_attribute(&fill, &[0.25f32]).unwrap();
    ds.write_attribute(&fill, &[-9i64, -8]).unwrap();

    let info = ds.attribute_info(&fill).unwrap();
    assert_eq!(info.element_type, Some(ElementType::I64));
    assert_eq!(info.len, 2);
    assert_eq!(ds.get_attribute::<i64>(&fill).unwrap(), vec![-9, -8]);
    assert!(ds.get_attribute::<f32>(&fill).unwrap_err().is_mismatch());
}

#[test]
fn empty_attribute_write_is_allowed() {
    let (mut ds, var) = five();
    let flags = var.attribute("flags");
    ds.write_attribute(&flags, &[] as &[i16]).unwrap();

    assert_eq!(ds.attribute_len(&flags).unwrap(), 0);
    assert_eq!(ds.get_attribute::<i16>(&flags).unwrap(), Vec::<i16>::new());
    let mut none: [i16; 0] = [];
    ds.read_attribute(&flags, &mut none).unwrap();
}

#[test]
fn get_array_through_views() {
    let (mut ds, var) = five();
    ds.write_array(&var, &ramp(5)).unwrap();
    let attr = var.attribute("range");
    ds.write_attribute(&attr, &[10.0f64, 14.0]).unwrap();

    let values: Vec<f64> = get_array(&ds.view(&var)).unwrap();
    assert_eq!(values.len(), 5);
    assert_eq!(values, ramp(5));

    let range: Vec<f64> = get_array(&ds.attribute_view(&attr)).unwrap();
    assert_eq!(range, vec![10.0, 14.0]);
}

#[test]
fn get_array_on_missing_attribute_fails_on_length() {
    let (ds, var) = five();
    let err = ds.get_attribute::<f64>(&var.attribute("nope")).unwrap_err();
    assert_eq!(err.storage_status(), Some(Status::AttributeNotFound));
}

#[test]
fn scalar_variables_hold_one_value() {
    let mut ds = Dataset::in_memory();
    let count = ds.add_variable::<u32>("count", &[]).unwrap();
    ds.write_array(&count, &[7u32]).unwrap();
    assert_eq!(ds.get_array::<u32>(&count).unwrap(), vec![7]);
    assert_eq!(ds.read_ndarray::<u32>(&count).unwrap().ndim(), 0);
}

#[test]
fn read_only_engine_reports_permission() {
    let mut engine = MemoryEngine::new();
    engine.add_dimension("n", 2).unwrap();
    engine.add_variable("v", ElementType::U8, &["n"]).unwrap();
    engine
        .put_attribute(&Owner::Global, "title", ncaccess::element::Buffer::U8(&[1]))
        .unwrap();
    engine.set_read_only(true);

    let mut ds = Dataset::with_engine(engine);
    let var = ds.variable("v").unwrap();
    let err = ds.write_array(&var, &[1u8, 2]).unwrap_err();
    assert_eq!(err.storage_status(), Some(Status::Permission));
    assert_eq!(ds.get_attribute::<u8>(&ds.attribute("title")).unwrap(), vec![1]);
}

#[test]
fn descriptors_do_not_cross_datasets() {
    let (mut first, var) = five();
    let (second, _) = five();
    let mut out = [0.0; 5];
    let err = second.read_array(&var, &mut out).unwrap_err();
    assert_eq!(err.storage_status(), Some(Status::BadId));

    first.write_array(&var, &ramp(5)).unwrap();
    first.close().unwrap();
}
