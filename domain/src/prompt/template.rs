//! Prompt templates for the council flow

use crate::council::{CandidateAnswer, FINAL_RANKING_MARKER, Review, labelled_answers};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt handed to every reviewer in the peer review stage.
    ///
    /// Answers are anonymized with the same positional labels the
    /// aggregator later resolves, and the reviewer is told to finish with a
    /// `FINAL RANKING:` numbered list.
    pub fn review_prompt(question: &str, answers: &[CandidateAnswer]) -> String {
        let anonymized = labelled_answers(answers)
            .into_iter()
            .map(|(label, answer)| format!("{}:\n{}\n", label, answer.response))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are evaluating different responses to the following question:

Question: {question}

Here are the responses from different models (anonymized):

{anonymized}
Your task:
1. First, evaluate each response individually. For each response, explain what it does well and what it does poorly.
2. Then, at the very end of your response, provide a final ranking.

IMPORTANT: Your final ranking MUST be formatted EXACTLY as follows:
- Start with the line "{marker}" (all caps, with colon)
- Then list the responses from best to worst as a numbered list
- Each line should be: number, period, space, then ONLY the response label (e.g., "1. Response A")
- Do not add any other text or explanations in the ranking section

Example of the correct format for your ENTIRE response:

Response A provides good detail on X but misses Y...
Response B is accurate but lacks depth on Z...
Response C offers the most comprehensive answer...

{marker}
1. Response C
2. Response A
3. Response B

Now provide your evaluation and ranking:"#,
            marker = FINAL_RANKING_MARKER,
        )
    }

    /// Prompt for the chairman model that writes the final synthesis.
    pub fn synthesis_prompt(
        question: &str,
        answers: &[CandidateAnswer],
        reviews: &[Review],
    ) -> String {
        let mut prompt = format!(
            r#"You are the Chairman of an LLM Council. Multiple AI models have provided responses to a user's question, and then ranked each other's responses.

Original Question: {}

STAGE 1 - Individual Responses:
"#,
            question
        );

        for answer in answers {
            prompt.push_str(&format!(
                "\nModel: {}\nResponse: {}\n",
                answer.model, answer.response
            ));
        }

        prompt.push_str("\nSTAGE 2 - Peer Rankings:\n");

        for review in reviews {
            prompt.push_str(&format!(
                "\nModel: {}\nRanking: {}\n",
                review.model, review.review
            ));
        }

        prompt.push_str(
            r#"
Your task as Chairman is to synthesize all of this information into a single, comprehensive, accurate answer to the user's original question. Consider:
- The individual responses and their insights
- The peer rankings and what they reveal about response quality
- Any patterns of agreement or disagreement

Provide a clear, well-reasoned final answer that represents the council's collective wisdom:
"#,
        );

        prompt
    }
}
