use serde_json::Value;

use article_ai::{
    config::Device,
    nlp::{ModelName, TextRecord},
    ProcessOptions, TextProcessor,
};

fn options(model: &str) -> ProcessOptions {
    ProcessOptions {
        model: model.to_string(),
        ..ProcessOptions::default()
    }
}

fn records(texts: &[&str]) -> Vec<TextRecord> {
    texts.iter().map(|text| TextRecord::new(*text)).collect()
}

#[tokio::test]
async fn apple_batch_has_entities_and_similarity() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let results = processor
        .process(
            records(&["Apple was founded in 1976.", "Apple released a new phone."]),
            &options("en_core_web_sm"),
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].entities.iter().any(|e| e.text == "Apple"));
    assert!(results[0].similarity.is_none());

    let similarity = results[1].similarity.expect("second text has similarity");
    assert!((-1.0..=1.0).contains(&similarity));
    assert!(!results[1].entities.is_empty());
    assert_eq!(results[1].model, ModelName::en_core_web_sm);
}

#[tokio::test]
async fn results_follow_input_order() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let texts = ["First article.", "Second article.", "Third article.", "Fourth."];
    let results = processor
        .process(records(&texts), &options("en_core_web_sm"))
        .await
        .unwrap();
    assert_eq!(results.len(), texts.len());
    for (idx, (result, text)) in results.iter().zip(texts).enumerate() {
        assert_eq!(result.text, text);
        assert_eq!(result.similarity.is_some(), idx > 0);
    }
}

#[tokio::test]
async fn non_english_language_suppresses_sentiment() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let options = ProcessOptions {
        model: "en_core_web_sm".into(),
        language: "fi".into(),
        ..ProcessOptions::default()
    };
    let results = processor
        .process(records(&["A great day.", "A terrible day."]), &options)
        .await
        .unwrap();
    assert!(results.iter().all(|r| r.sentiment.is_none()));
    assert!(results
        .iter()
        .all(|r| !r.pipeline_components.contains(&"sentiment".to_string())));

    let english = processor
        .process(records(&["A great day."]), &ProcessOptions::default())
        .await
        .unwrap();
    let sentiment = english[0].sentiment.as_ref().expect("english sentiment");
    assert!(sentiment.polarity > 0.0);
}

#[tokio::test]
async fn keyword_lists_respect_top_n() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let options = ProcessOptions {
        model: "en_core_web_sm".into(),
        top_n: 2,
        ..ProcessOptions::default()
    };
    let results = processor
        .process(
            records(&["Supply chain visibility startups track shipments across oceans."]),
            &options,
        )
        .await
        .unwrap();
    assert_eq!(results[0].keywords.len(), 2);
}

#[tokio::test]
async fn unknown_model_fails_without_caching() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let err = processor
        .process(records(&["x"]), &options("not_a_real_model"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown model"));
    assert!(processor.pipelines().is_empty());
}

#[tokio::test]
async fn text_ids_are_echoed() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let texts = vec![
        TextRecord::with_id("Nokia opened an office.", "a-1".into()),
        TextRecord::with_id("Volvo opened a plant.", 2.into()),
    ];
    let results = processor.process(texts, &options("en_core_web_sm")).await.unwrap();
    assert_eq!(results[0].text_id, Some(Value::from("a-1")));
    assert_eq!(results[1].text_id, Some(Value::from(2)));
}

#[tokio::test]
async fn smoke_test_runs_default_model() {
    let processor = TextProcessor::with_device(Device::Cpu);
    let results = processor.smoke_test().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].model, ModelName::en_core_web_md);
    assert!(results[0].entities.iter().any(|e| e.text == "Tive"));
    assert!(results[1].similarity.is_some());
    assert!(processor.pipelines().is_loaded(ModelName::en_core_web_md));
}
