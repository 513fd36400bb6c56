use faq_matcher::{ChatConfig, FaqChatbot, FaqCorpus, FaqMatcher, VectorizerConfig};

fn main() -> faq_matcher::Result<()> {
    // fit a matcher on the bundled corpus
    let corpus = FaqCorpus::bundled()?;
    let mut matcher: FaqMatcher = FaqMatcher::new();
    matcher.fit(&corpus.questions())?;

    let hits = matcher.score("How can I install Python?")?;
    println!("Scores: \n{}", hits);
    println!("{:#?}", hits);

    // the same corpus behind a chatbot
    let bot = FaqChatbot::new(corpus, VectorizerConfig::default(), ChatConfig::default())?;
    let response = bot.get_response("Tell me about Git")?;
    println!("{}", response.answer);
    println!("{}", serde_json::to_string_pretty(&bot.payload("Tell me about Git")?)?);
    Ok(())
}
