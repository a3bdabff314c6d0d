//! Integration tests for the RightsAnalyzer

#[cfg(test)]
mod tests {
    use crate::{EngineConfig, RightsAnalyzer, StaticGlossary, NEUTRAL_BASELINE_SCORE};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use termsguard_domain::{
        AugmentError, Augmentation, Category, ClauseAugmenter, ClauseCounts, DefinitionLookup,
        DocumentAnalysis, Grade, LookupError, MlSignal,
    };

    const HIGH_RISK_TEXT: &str = "You agree to binding arbitration for all disputes. Class action waiver applies. \
        We reserve the right to change these terms at any time. We may sell your data.";

    const POSITIVE_TEXT: &str = "We do not sell your personal data. You can opt-out using our opt-out process. \
        You may delete your account at any time.";

    const NEUTRAL_TEXT: &str = "Welcome to our website. Enjoy your stay.";

    const FILLER: &str = "The service is provided to help you manage daily tasks.";
    const DATA_SALE: &str = "In some cases we may sell your data to partners.";

    fn analyzer() -> RightsAnalyzer {
        RightsAnalyzer::new(EngineConfig::default()).unwrap()
    }

    async fn analyze(text: &str) -> DocumentAnalysis {
        let outcome = analyzer().analyze(text).await;
        assert!(!outcome.is_degraded(), "unexpected degradation: {:?}", outcome.reason());
        outcome.into_analysis()
    }

    /// 1000 words: 99 filler sentences and one data-sale sentence
    fn block() -> String {
        let mut sentences = vec![FILLER; 99];
        sentences.insert(50, DATA_SALE);
        sentences.join(" ")
    }

    #[tokio::test]
    async fn test_high_risk_document() {
        let analysis = analyze(HIGH_RISK_TEXT).await;
        let counts = &analysis.details.clause_counts;

        assert!(counts.get(Category::HighRisk, "ARBITRATION") >= 1);
        assert!(counts.get(Category::HighRisk, "CLASS_ACTION_WAIVER") >= 1);
        assert!(analysis.rights_score < 70.0);
        assert!(matches!(analysis.grade, Grade::C | Grade::D | Grade::F));
        // -15 -15 -12 -10
        assert_eq!(analysis.rights_score, 48.0);
    }

    #[tokio::test]
    async fn test_positive_document() {
        let analysis = analyze(POSITIVE_TEXT).await;
        let counts = &analysis.details.clause_counts;

        assert!(counts.get(Category::Positives, "CLEAR_OPT_OUT") >= 1);
        assert!(counts.get(Category::Positives, "SELF_SERVICE_DELETION") >= 1);
        assert!(analysis.rights_score > 70.0);
        assert_eq!(analysis.grade, Grade::A);
    }

    #[tokio::test]
    async fn test_neutral_document_scores_baseline() {
        let analysis = analyze(NEUTRAL_TEXT).await;

        assert_eq!(analysis.rights_score, NEUTRAL_BASELINE_SCORE);
        assert_eq!(analysis.grade, Grade::B);
        assert_eq!(analysis.details.clause_signals, 0);
        assert_eq!(analysis.confidence, 0.4);
    }

    #[tokio::test]
    async fn test_empty_document() {
        let analysis = analyze("").await;

        assert_eq!(analysis.details.chunk_count, 1);
        assert_eq!(analysis.details.word_count, 1);
        assert_eq!(analysis.rights_score, NEUTRAL_BASELINE_SCORE);
    }

    #[tokio::test]
    async fn test_length_normalization() {
        let mut config = EngineConfig::default();
        config.chunk_size = 1_000_000;
        let analyzer = RightsAnalyzer::new(config).unwrap();

        let short = vec![block(); 2].join(" ");
        let long = vec![block(); 20].join(" ");
        let short = analyzer.analyze(&short).await.into_analysis();
        let long = analyzer.analyze(&long).await.into_analysis();

        assert_eq!(short.details.word_count, 2_000);
        assert_eq!(long.details.word_count, 20_000);
        assert_eq!(short.details.chunk_count, 1);
        assert_eq!(long.details.chunk_count, 1);
        // Same density per 1000 words gives the same normalized penalty
        assert!((short.rights_score - 90.0).abs() < 1e-9);
        assert!((long.rights_score - short.rights_score).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_added_high_risk_sentence_never_raises_score() {
        let base = "We may sell your data.";
        let worse = format!("{} You agree to binding arbitration.", base);

        let before = analyze(base).await;
        let after = analyze(&worse).await;
        assert_eq!(before.rights_score, 90.0);
        assert_eq!(after.rights_score, 75.0);
    }

    #[tokio::test]
    async fn test_long_document_is_chunked() {
        let text = vec![block(); 3].join(" ");
        let analysis = analyze(&text).await;

        assert!(analysis.details.chunk_count > 3);
        assert_eq!(analysis.details.word_count, 3_000);
        assert_eq!(
            analysis.details.clause_counts.get(Category::HighRisk, "DATA_SALE_OR_SHARING"),
            3
        );
        assert_eq!(analysis.details.clause_signals, 3);
    }

    #[tokio::test]
    async fn test_legal_header_raises_confidence() {
        let plain = analyze(NEUTRAL_TEXT).await;
        let titled = analyze(&format!("Terms of Service\n{}", NEUTRAL_TEXT)).await;
        assert_eq!(plain.confidence, 0.4);
        assert_eq!(titled.confidence, 0.6);
    }

    #[tokio::test]
    async fn test_category_scores_reported() {
        let analysis = analyze(HIGH_RISK_TEXT).await;
        let scores = &analysis.details.category_scores;

        assert_eq!(scores["DISPUTE_RESOLUTION"].score, 85.0);
        assert_eq!(scores["CLASS_ACTIONS"].score, 85.0);
        assert_eq!(scores["CONSENT_AND_OPT_OUT"].score, 100.0);
        assert!(analysis
            .details
            .unmapped_clause_keys
            .contains(&"PLAIN_LANGUAGE".to_string()));
    }

    #[tokio::test]
    async fn test_json_contract() {
        let analysis = analyze(HIGH_RISK_TEXT).await;
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["grade"], "F");
        assert!(json["rightsScore"].is_number());
        assert!(json["confidence"].is_number());
        assert!(json["uncommonWords"].is_array());
        assert_eq!(json["details"]["chunkCount"], 1);
        assert_eq!(json["details"]["clauseCounts"]["HIGH_RISK"]["ARBITRATION"], 1);
        assert_eq!(json["details"]["clauseCounts"]["POSITIVES"]["CLEAR_OPT_OUT"], 0);
        assert!(json["details"]["dictionaryTerms"].is_array());
        assert!(json["details"].get("mlCategoryScores").is_none());
        assert!(json["details"].get("error").is_none());

        let back: DocumentAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(back, analysis);
    }

    #[tokio::test]
    async fn test_dictionary_terms() {
        let analyzer = analyzer().with_dictionary(Arc::new(StaticGlossary::builtin()));
        let analysis = analyzer.analyze(HIGH_RISK_TEXT).await.into_analysis();

        assert_eq!(analysis.uncommon_words[0].word, "arbitration");
        assert!(analysis
            .details
            .dictionary_terms
            .iter()
            .any(|t| t.word == "waiver" && t.count == 1 && !t.definition.is_empty()));
    }

    struct OfflineDictionary;

    #[async_trait]
    impl DefinitionLookup for OfflineDictionary {
        async fn definition(&self, _word: &str) -> Result<Option<String>, LookupError> {
            Err(LookupError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_dictionary_failure_is_not_fatal() {
        let analyzer = analyzer().with_dictionary(Arc::new(OfflineDictionary));
        let outcome = analyzer.analyze(HIGH_RISK_TEXT).await;

        assert!(!outcome.is_degraded());
        let analysis = outcome.analysis();
        assert!(analysis.uncommon_words.is_empty());
        assert_eq!(analysis.rights_score, 48.0);
    }

    struct ModelAugmenter;

    #[async_trait]
    impl ClauseAugmenter for ModelAugmenter {
        async fn augment(&self, _chunk: &str, _counts: &ClauseCounts) -> Result<Augmentation, AugmentError> {
            Ok(Augmentation::none()
                .with_count(Category::HighRisk, "ARBITRATION", 1)
                .with_category_signal("DISPUTE_RESOLUTION", MlSignal::Probability(0.8))
                .with_category_signal("DATA_PRACTICES", MlSignal::Score { score: 35.0 }))
        }
    }

    #[tokio::test]
    async fn test_augmenter_counts_and_signals() {
        let analyzer = analyzer().with_augmenter(Arc::new(ModelAugmenter));
        let analysis = analyzer.analyze(NEUTRAL_TEXT).await.into_analysis();

        assert_eq!(analysis.details.clause_counts.get(Category::HighRisk, "ARBITRATION"), 1);
        assert_eq!(analysis.details.clause_signals, 1);
        assert_eq!(analysis.rights_score, 80.0);
        assert_eq!(analysis.details.category_scores["DISPUTE_RESOLUTION"].score, 85.0);

        let ml = analysis.details.ml_category_scores.unwrap();
        assert_eq!(ml["DISPUTE_RESOLUTION"].observations, 1);
        assert!((ml["DISPUTE_RESOLUTION"].score - 20.0).abs() < 1e-9);
        assert!((ml["DATA_PRACTICES"].probability - 0.65).abs() < 1e-9);
        assert_eq!(ml["DATA_PRACTICES"].score, 35.0);
    }

    struct BrokenAugmenter;

    #[async_trait]
    impl ClauseAugmenter for BrokenAugmenter {
        async fn augment(&self, chunk: &str, _counts: &ClauseCounts) -> Result<Augmentation, AugmentError> {
            if chunk.contains("arbitration") {
                panic!("tokenizer crashed");
            }
            Err(AugmentError::Model("weights not loaded".to_string()))
        }
    }

    struct HangingAugmenter;

    #[async_trait]
    impl ClauseAugmenter for HangingAugmenter {
        async fn augment(&self, _chunk: &str, _counts: &ClauseCounts) -> Result<Augmentation, AugmentError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Augmentation::none().with_count(Category::HighRisk, "ARBITRATION", 5))
        }
    }

    #[tokio::test]
    async fn test_failing_augmenter_falls_back_to_rules() {
        let expected = analyze(HIGH_RISK_TEXT).await;

        let analyzer = analyzer().with_augmenter(Arc::new(BrokenAugmenter));
        let outcome = analyzer.analyze(HIGH_RISK_TEXT).await;
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.analysis(), &expected);
    }

    #[tokio::test]
    async fn test_slow_augmenter_times_out() {
        let mut config = EngineConfig::default();
        config.augment_timeout_ms = 50;
        let analyzer = RightsAnalyzer::new(config)
            .unwrap()
            .with_augmenter(Arc::new(HangingAugmenter));

        let analysis = analyzer.analyze(NEUTRAL_TEXT).await.into_analysis();
        assert_eq!(analysis.rights_score, NEUTRAL_BASELINE_SCORE);
        assert!(analysis.details.ml_category_scores.is_none());
    }

    #[tokio::test]
    async fn test_oversized_input_degrades() {
        let mut config = EngineConfig::default();
        config.max_text_length = 1_000;
        let analyzer = RightsAnalyzer::new(config).unwrap();

        let outcome = analyzer.analyze(&block()).await;
        assert!(outcome.is_degraded());
        assert!(outcome.analysis().details.error.is_some());
        assert_eq!(outcome.analysis().grade, Grade::D);
    }

    #[tokio::test]
    async fn test_shared_analyzer_across_tasks() {
        let analyzer = Arc::new(analyzer());
        let mut handles = Vec::new();
        for text in [HIGH_RISK_TEXT, POSITIVE_TEXT, NEUTRAL_TEXT, HIGH_RISK_TEXT] {
            let analyzer = Arc::clone(&analyzer);
            handles.push(tokio::spawn(async move { analyzer.analyze(text).await.into_analysis() }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        assert_eq!(results[0], results[3]);
        assert_eq!(results[2].rights_score, NEUTRAL_BASELINE_SCORE);
    }
}
