//! tests/api/spec.rs
use claims::{assert_none, assert_some};
use inverted_index::configuration::{IndexVariant, Settings};
use inverted_index::spec::{
    MapReduceInput, MapReduceOutput, MapReduceSpecification, COMBINER, REDUCER,
};
use std::path::Path;

#[test]
fn you_should_be_able_to_create_a_map_reduce_spec() {
    let spec = MapReduceSpecification::new(Default::default(), 1024);
    assert_eq!(spec.split_size_in_bytes(), 1024);
    assert!(spec.inputs().is_empty());
    assert_none!(spec.output());
}

#[test]
fn split_size_is_at_least_one_byte() {
    let spec = MapReduceSpecification::new(Default::default(), 0);
    assert_eq!(spec.split_size_in_bytes(), 1);
}

#[test]
fn you_should_be_able_to_add_input_to_a_map_reduce_spec() {
    let mut spec = MapReduceSpecification::new(Default::default(), 1024);
    for i in 0..5 {
        spec.add_input(MapReduceInput::new(format!("input_{i}.txt"), "unigram"));
    }

    assert_eq!(spec.inputs().len(), 5);
    for (i, input) in spec.inputs().iter().enumerate() {
        assert_eq!(input.path(), Path::new(&format!("input_{i}.txt")));
        assert_eq!(input.mapper(), "unigram");
    }
}

#[test]
fn you_should_be_able_to_define_an_output_on_a_spec() {
    let mut spec = MapReduceSpecification::new(Default::default(), 1024);
    spec.set_output(MapReduceOutput::new("/tmp/index", 0, REDUCER, Some(COMBINER)));

    let output = assert_some!(spec.output());
    assert_eq!(output.base_path(), Path::new("/tmp/index"));
    assert_eq!(output.num_tasks(), 1);
    assert_eq!(output.reducer(), "posting_reducer");
    assert_eq!(output.combiner(), Some("posting_combiner"));
}

#[test]
fn settings_describe_a_complete_index_job() {
    let mut settings = Settings::default();
    settings.index.variant = IndexVariant::Bigram;
    settings.cluster.reduce_tasks = 3;
    settings.cluster.combine = false;

    let spec = MapReduceSpecification::from_settings(
        &settings,
        Path::new("corpus"),
        Path::new("index"),
    );

    assert_eq!(spec.inputs().len(), 1);
    assert_eq!(spec.inputs()[0].mapper(), "bigram");
    assert_eq!(spec.inputs()[0].path(), Path::new("corpus"));
    let output = assert_some!(spec.output());
    assert_eq!(output.num_tasks(), 3);
    assert_none!(output.combiner());
    assert_eq!(spec.index().target_bigrams.len(), 5);
}
