//! tests/api/mapreduce.rs
use crate::helpers::{output_dir, part_files, read_index, test_data_dir};
use claims::{assert_matches, assert_ok};
use inverted_index::configuration::{IndexVariant, Settings};
use inverted_index::error::JobError;
use inverted_index::executors::{Executor, ParallelExecutor, SequentialExecutor};
use inverted_index::mapreduce::{JobCounters, MapReduce};
use inverted_index::output::SUCCESS_MARKER;
use inverted_index::spec::{
    MapReduceInput, MapReduceOutput, MapReduceSpecification, COMBINER, REDUCER,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn job(settings: &Settings, input: &Path) -> (MapReduce, PathBuf) {
    let output = output_dir();
    let spec = MapReduceSpecification::from_settings(settings, input, &output);
    let job = MapReduce::new(spec).expect("Failed to create index job");
    (job, output)
}

async fn run_index<E: Executor>(
    settings: &Settings,
    input: &Path,
    executor: &E,
) -> (BTreeMap<String, String>, JobCounters) {
    let (job, output) = job(settings, input);
    let counters = job.run(executor).await.expect("Index job failed");
    assert!(output.join(SUCCESS_MARKER).is_file());
    let index = read_index(&output);
    std::fs::remove_dir_all(&output).expect("Failed to delete output");
    (index, counters)
}

fn expected_unigram_index() -> BTreeMap<String, String> {
    [
        ("an", "docs_2.txt:1"),
        ("computer", "d1:2 d3:1"),
        ("fiction", "d2:1"),
        ("fun", "d1:1"),
        ("id", "docs_2.txt:1"),
        ("is", "d1:1"),
        ("lab", "d3:2"),
        ("line", "docs_2.txt:1"),
        ("science", "d1:1 d2:1 d3:1"),
        ("the", "d3:2"),
        ("untitled", "docs_2.txt:1"),
        ("without", "docs_2.txt:1"),
    ]
    .into_iter()
    .map(|(term, postings)| (term.to_string(), postings.to_string()))
    .collect()
}

#[tokio::test]
async fn unigram_index_over_a_directory() {
    // Arrange
    let settings = Settings::default();
    let input = test_data_dir().join("corpus");

    // Act
    let (index, counters) = run_index(&settings, &input, &SequentialExecutor).await;

    // Assert
    assert_eq!(index, expected_unigram_index());
    assert_eq!(counters.map_tasks, 2);
    assert_eq!(counters.reduce_tasks, 1);
    assert_eq!(counters.map_input_records, 6);
    assert_eq!(counters.reduce_output_records, 12);
}

#[tokio::test]
async fn parallel_and_sequential_executors_agree() {
    let mut settings = Settings::default();
    settings.cluster.split_size_in_bytes = 16;
    let input = test_data_dir().join("corpus");

    let (sequential, _) = run_index(&settings, &input, &SequentialExecutor).await;
    let (parallel, counters) = run_index(&settings, &input, &ParallelExecutor::new(3)).await;

    assert_eq!(sequential, expected_unigram_index());
    assert_eq!(parallel, sequential);
    assert!(counters.map_tasks > 2);
}

#[tokio::test]
async fn reduce_task_count_does_not_change_the_index() {
    let input = test_data_dir().join("corpus");
    let mut settings = Settings::default();
    settings.cluster.reduce_tasks = 4;

    let (job, output) = job(&settings, &input);
    let counters = job
        .run(&ParallelExecutor::new(2))
        .await
        .expect("Index job failed");

    assert_eq!(counters.reduce_tasks, 4);
    assert_eq!(part_files(&output).len(), 4);
    assert_eq!(read_index(&output), expected_unigram_index());
    std::fs::remove_dir_all(&output).expect("Failed to delete output");
}

#[tokio::test]
async fn combining_does_not_change_the_index() {
    let input = test_data_dir().join("corpus");
    let mut without_combiner = Settings::default();
    without_combiner.cluster.combine = false;
    // One record per split.
    without_combiner.cluster.split_size_in_bytes = 1;
    let mut with_combiner = without_combiner.clone();
    with_combiner.cluster.combine = true;
    with_combiner.cluster.split_size_in_bytes = 1024;

    let (plain, plain_counters) =
        run_index(&without_combiner, &input, &SequentialExecutor).await;
    let (combined, combined_counters) =
        run_index(&with_combiner, &input, &SequentialExecutor).await;

    assert_eq!(plain, combined);
    assert_eq!(
        plain_counters.combine_output_records,
        plain_counters.map_output_records
    );
    assert_eq!(
        combined_counters.map_output_records,
        plain_counters.map_output_records
    );
}

#[tokio::test]
async fn bigram_index_keeps_only_target_phrases() {
    let mut settings = Settings::default();
    settings.index.variant = IndexVariant::Bigram;
    let input = test_data_dir().join("films").join("films.txt");

    let (index, _) = run_index(&settings, &input, &ParallelExecutor::default()).await;

    let expected: BTreeMap<String, String> = [
        ("bruce willis", "f1:1 f3:1"),
        ("computer science", "f2:2"),
        ("information retrieval", "f2:1"),
        ("los angeles", "f1:1 f3:2 f4:1"),
    ]
    .into_iter()
    .map(|(term, postings)| (term.to_string(), postings.to_string()))
    .collect();
    assert_eq!(index, expected);
}

#[tokio::test]
async fn bigram_allow_list_comes_from_settings() {
    let mut settings = Settings::default();
    settings.index.variant = IndexVariant::Bigram;
    settings.index.target_bigrams = vec!["Angeles Police".to_string()];
    let input = test_data_dir().join("films");

    let (index, _) = run_index(&settings, &input, &SequentialExecutor).await;

    assert_eq!(index.len(), 1);
    assert_eq!(index["angeles police"], "f3:1");
}

#[tokio::test]
async fn an_existing_output_directory_is_an_error() {
    let (job, output) = job(&Settings::default(), &test_data_dir().join("corpus"));
    std::fs::create_dir_all(&output).expect("Failed to create output");

    let result = job.run(&SequentialExecutor).await;

    assert_matches!(result, Err(JobError::OutputExists(_)));
    assert!(part_files(&output).is_empty());
    std::fs::remove_dir_all(&output).expect("Failed to delete output");
}

#[test]
fn a_missing_input_is_an_error() {
    let output = output_dir();
    let spec = MapReduceSpecification::from_settings(
        &Settings::default(),
        &test_data_dir().join("no-such-corpus"),
        &output,
    );
    assert_matches!(MapReduce::new(spec).err(), Some(JobError::NoInput(_)));
}

#[tokio::test]
async fn an_empty_input_directory_produces_an_empty_index() {
    let input = output_dir();
    std::fs::create_dir_all(&input).expect("Failed to create input");

    let (job, output) = job(&Settings::default(), &input);
    let counters = assert_ok!(job.run(&ParallelExecutor::new(2)).await);

    assert_eq!(counters.map_tasks, 0);
    assert!(read_index(&output).is_empty());
    assert!(output.join(SUCCESS_MARKER).is_file());
    std::fs::remove_dir_all(&output).expect("Failed to delete output");
    std::fs::remove_dir_all(&input).expect("Failed to delete input");
}

#[tokio::test]
async fn a_misconfigured_job_leaves_no_output_behind() {
    let output = output_dir();
    let mut spec = MapReduceSpecification::new(Default::default(), 1024);
    spec.add_input(MapReduceInput::new(test_data_dir().join("corpus"), "trigram"));
    spec.set_output(MapReduceOutput::new(&output, 1, REDUCER, Some(COMBINER)));
    let job = MapReduce::new(spec).expect("Failed to create index job");

    let result = job.run(&SequentialExecutor).await;

    assert_matches!(result, Err(JobError::UnknownMapper(name)) if name == "trigram");
    assert!(!output.exists());

    // Fixing the configuration and running again to the same path works.
    let spec = MapReduceSpecification::from_settings(
        &Settings::default(),
        &test_data_dir().join("corpus"),
        &output,
    );
    let job = MapReduce::new(spec).expect("Failed to create index job");
    assert_ok!(job.run(&SequentialExecutor).await);
    assert_eq!(read_index(&output), expected_unigram_index());
    std::fs::remove_dir_all(&output).expect("Failed to delete output");
}

#[tokio::test]
async fn a_job_failing_during_execution_removes_its_output() {
    let input = output_dir();
    std::fs::create_dir_all(&input).expect("Failed to create input");
    std::fs::write(input.join("docs.txt"), "d1\tcomputer\n").expect("Failed to write input");
    let (job, output) = job(&Settings::default(), &input);
    // The split was cut; its file disappears before the map task reads it.
    std::fs::remove_dir_all(&input).expect("Failed to delete input");

    let result = job.run(&ParallelExecutor::new(2)).await;

    assert_matches!(result, Err(JobError::Io { .. }));
    assert!(!output.exists());
}

fn example_index(variant: IndexVariant) -> Settings {
    let mut settings = Settings::default();
    settings.index.variant = variant;
    settings
}

#[tokio::test]
async fn documented_unigram_example() {
    let settings = example_index(IndexVariant::Unigram);
    let input = test_data_dir().join("example");

    let (index, _) = run_index(&settings, &input, &SequentialExecutor).await;

    assert_eq!(index["computer"], "d1:2 d2:1");
    assert_eq!(index["science"], "d1:2 d2:1");
    assert_eq!(index["great"], "d1:1");
    assert_eq!(index["love"], "d2:1");
    assert_eq!(index.len(), 7);
}

#[tokio::test]
async fn documented_bigram_example() {
    let settings = example_index(IndexVariant::Bigram);
    let input = test_data_dir().join("example").join("docs.txt");

    let (index, _) = run_index(&settings, &input, &ParallelExecutor::new(2)).await;

    let expected: BTreeMap<String, String> =
        [("computer science".to_string(), "d1:2 d2:1".to_string())].into();
    assert_eq!(index, expected);
}
