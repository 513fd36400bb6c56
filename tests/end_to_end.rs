use faq_matcher::{
    normalize, ChatConfig, FaqChatbot, FaqCorpus, FaqEntry, FaqMatcher, MatcherError, VectorizerConfig,
};

fn bundled_matcher() -> (FaqCorpus, FaqMatcher) {
    let corpus = FaqCorpus::bundled().unwrap();
    let mut matcher: FaqMatcher = FaqMatcher::new();
    matcher.fit(&corpus.questions()).unwrap();
    (corpus, matcher)
}

#[test]
fn every_corpus_index_scored_once() {
    let (corpus, matcher) = bundled_matcher();
    for query in ["", "python", "How do I use Git with Python?", "!!!", "a an the"] {
        let hits = matcher.score(query).unwrap();
        assert_eq!(hits.len(), corpus.len());
        let mut seen = vec![false; corpus.len()];
        for hit in hits.iter() {
            assert!(!seen[hit.index], "duplicate index {}", hit.index);
            seen[hit.index] = true;
            assert!((0.0..=1.0).contains(&hit.similarity));
            assert!(!hit.similarity.is_nan());
        }
    }
}

#[test]
fn corpus_questions_rank_themselves_first() {
    let (corpus, matcher) = bundled_matcher();
    for (index, question) in corpus.questions().into_iter().enumerate() {
        let hits = matcher.score(question).unwrap();
        let best = hits.best().unwrap();
        assert_eq!(best.index, index, "{question}");
        assert!((best.similarity - 1.0).abs() < 1e-9, "{question}: {}", best.similarity);
    }
}

#[test]
fn normalization_is_idempotent_on_corpus() {
    let corpus = FaqCorpus::bundled().unwrap();
    for entry in corpus.entries() {
        for text in [&entry.question, &entry.answer] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once);
        }
    }
}

#[test]
fn ties_keep_corpus_order() {
    let mut matcher: FaqMatcher = FaqMatcher::new();
    matcher.fit(&["What is Python?", "What is python?"]).unwrap();
    let hits = matcher.score("python").unwrap();
    let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
    assert_eq!(order, vec![0, 1]);
    assert_eq!(hits.list[0].similarity, hits.list[1].similarity);
}

#[test]
fn scoring_requires_fit() {
    let matcher: FaqMatcher = FaqMatcher::new();
    assert_eq!(matcher.score("python").unwrap_err(), MatcherError::NotTrained);
}

#[test]
fn related_question_matches_python_entry() {
    let corpus = FaqCorpus::new(vec![
        FaqEntry::new("What is Python?", "Python is a language..."),
        FaqEntry::new("What is Git?", "Git is a version control system."),
        FaqEntry::new("What is a database?", "A database stores data."),
    ])
    .unwrap();
    let mut matcher: FaqMatcher = FaqMatcher::new();
    matcher.fit(&corpus.questions()).unwrap();

    let best = matcher.find_best_match("Tell me about Python", 0.15).unwrap();
    assert!(best.processed_question.split(' ').any(|t| t == "python"));
    assert_eq!(best.index, 0);
    assert!(best.is_match);
    assert!(best.similarity > 0.0);
}

#[test]
fn gibberish_matches_nothing() {
    let (_, matcher) = bundled_matcher();
    let hits = matcher.score("asdkjaslkdj").unwrap();
    assert!(hits.iter().all(|h| h.similarity == 0.0));
    let best = matcher.find_best_match("asdkjaslkdj", 0.15).unwrap();
    assert_eq!(best.similarity, 0.0);
    assert!(!best.is_match);
}

#[test]
fn chatbot_answers_sample_questions() {
    let bot = FaqChatbot::new(
        FaqCorpus::bundled().unwrap(),
        VectorizerConfig::default(),
        ChatConfig::default(),
    )
    .unwrap();

    let cases = [
        ("What is Python?", Some("What is Python?")),
        ("How do I install Python?", Some("How do I install Python?")),
        ("What is machine learning?", Some("What is machine learning?")),
        ("Tell me about Git", Some("What is Git?")),
        ("asdkjaslkdj", None),
    ];
    for (question, expected) in cases {
        let response = bot.get_response(question).unwrap();
        assert_eq!(response.matched_question.as_deref(), expected, "{question}");
        assert_eq!(response.is_match, expected.is_some());
    }
}

#[test]
fn stricter_threshold_rejects_partial_matches() {
    let corpus = FaqCorpus::bundled().unwrap();
    let chat = ChatConfig {
        similarity_threshold: 0.99,
        ..ChatConfig::default()
    };
    let bot = FaqChatbot::new(corpus, VectorizerConfig::default(), chat).unwrap();
    let partial = bot.get_response("How do I install Git?").unwrap();
    assert!(!partial.is_match);
    assert!(partial.confidence > 0.0);
    assert!(partial.matched_question.is_none());
    assert_eq!(partial.answer, bot.config().fallback_message);

    let exact = bot.get_response("What is Git?").unwrap();
    assert!(exact.is_match);
}

#[test]
fn batch_answers_follow_input_order() {
    let bot = FaqChatbot::new(
        FaqCorpus::bundled().unwrap(),
        VectorizerConfig::default(),
        ChatConfig::default(),
    )
    .unwrap();
    let questions: Vec<String> = bot
        .corpus()
        .questions()
        .into_iter()
        .rev()
        .map(str::to_string)
        .collect();
    let responses = bot.answer_batch(&questions);
    for (question, response) in questions.iter().zip(responses) {
        let response = response.unwrap();
        assert_eq!(response.matched_question.as_deref(), Some(question.as_str()));
    }
}

#[test]
fn unigram_only_matcher_still_matches() {
    let config = VectorizerConfig {
        ngram_range: (1, 1),
        ..VectorizerConfig::default()
    };
    let mut matcher: FaqMatcher = FaqMatcher::with_config(config);
    matcher.fit(&FaqCorpus::bundled().unwrap().questions()).unwrap();
    assert!(matcher.vocabulary().unwrap().iter().all(|(term, _)| !term.contains(' ')));
    assert_eq!(matcher.find_best_match("commit git", 0.15).unwrap().index, 6);
}
