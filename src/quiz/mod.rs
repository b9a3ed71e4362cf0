//! Knowledge-check quiz
//!
//! A `QuizSession` walks through the question bank one question at a time.
//! Answers are locked once submitted.

use serde::Serialize;
use thiserror::Error;

/// Errors from checking a single answer
#[derive(Error, Debug, PartialEq)]
pub enum QuizError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(u32),

    #[error("Option {option} out of range for question {question} ({count} options)")]
    InvalidOption {
        question: u32,
        option: usize,
        count: usize,
    },

    #[error("Quiz incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

/// A multiple-choice question
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip)]
    pub correct_option: usize,
    #[serde(skip)]
    pub explanation: String,
}

/// Result of answering one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Grade `option` against this question
    pub fn check(&self, option: usize) -> Result<AnswerOutcome, QuizError> {
        if option >= self.options.len() {
            return Err(QuizError::InvalidOption {
                question: self.id,
                option,
                count: self.options.len(),
            });
        }
        Ok(AnswerOutcome {
            correct: option == self.correct_option,
            correct_option: self.correct_option,
            explanation: self.explanation.clone(),
        })
    }
}

/// Find a question by id and grade the answer
pub fn check_answer(
    questions: &[QuizQuestion],
    question_id: u32,
    option: usize,
) -> Result<AnswerOutcome, QuizError> {
    questions
        .iter()
        .find(|q| q.id == question_id)
        .ok_or(QuizError::UnknownQuestion(question_id))?
        .check(option)
}

/// Closing remark for a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Perfect,
    Good,
    KeepPracticing,
}

impl Verdict {
    /// Verdict for `score` correct answers out of `total`
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            Verdict::Perfect
        } else if score >= total * 7 / 10 {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect score! You're a master of iterative prompting!",
            Verdict::Good => "Great job! You have a solid understanding of iterative prompting.",
            Verdict::KeepPracticing => {
                "Keep learning! Review the tutorial sections to strengthen your understanding."
            }
        }
    }
}

/// Progress through the question bank
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    questions: &'a [QuizQuestion],
    current: usize,
    selected: Option<usize>,
    answered: bool,
    score: usize,
    completed: bool,
}

impl<'a> QuizSession<'a> {
    pub fn new(questions: &'a [QuizQuestion]) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            answered: false,
            score: 0,
            completed: questions.is_empty(),
        }
    }

    pub fn current_question(&self) -> Option<&'a QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Choose an option; ignored after submission or when out of range
    pub fn select(&mut self, option: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if self.answered || option >= question.options.len() {
            return false;
        }
        self.selected = Some(option);
        true
    }

    /// Lock in the selected option
    ///
    /// Returns `None` when nothing is selected or the answer was already
    /// submitted.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        if self.answered {
            return None;
        }
        let question = self.current_question()?;
        let outcome = question.check(self.selected?).ok()?;

        self.answered = true;
        if outcome.correct {
            self.score += 1;
        }
        Some(outcome)
    }

    /// Move to the next question, completing the quiz after the last one
    pub fn next(&mut self) {
        if self.completed {
            return;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.answered = false;
        } else {
            self.completed = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.questions);
    }

    /// Final verdict, once completed
    pub fn verdict(&self) -> Option<Verdict> {
        if !self.completed {
            return None;
        }
        Some(Verdict::for_score(self.score, self.questions.len()))
    }
}

/// Final result of a completed quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub verdict: Verdict,
    pub message: String,
}

/// Play `answers` through a fresh session, one option per question in order
pub fn grade(questions: &[QuizQuestion], answers: &[usize]) -> Result<QuizResult, QuizError> {
    let mut session = QuizSession::new(questions);
    for &option in answers {
        let Some(question) = session.current_question() else {
            break;
        };
        if !session.select(option) {
            return Err(QuizError::InvalidOption {
                question: question.id,
                option,
                count: question.options.len(),
            });
        }
        session.submit();
        session.next();
    }

    let verdict = session.verdict().ok_or(QuizError::Incomplete {
        answered: answers.len(),
        total: questions.len(),
    })?;
    Ok(QuizResult {
        score: session.score(),
        total: questions.len(),
        verdict,
        message: verdict.message().to_string(),
    })
}

fn question(
    id: u32,
    text: &str,
    options: [&str; 4],
    correct: usize,
    explanation: &str,
) -> QuizQuestion {
    QuizQuestion {
        id,
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option: correct,
        explanation: explanation.to_string(),
    }
}

/// The tutorial's question bank
pub fn builtin_questions() -> Vec<QuizQuestion> {
    vec![
        question(
            1,
            "What is the primary goal of Iterative & Progressive Detail Prompting?",
            [
                "To generate as many images as possible in a short time",
                "To refine an AI-generated image through multiple iterations with increasingly detailed prompts",
                "To create photorealistic images in a single prompt",
                "To combine multiple AI models for better results",
            ],
            1,
            "Iterative & Progressive Detail Prompting is about systematically refining images through multiple iterations, gradually adding more specific details to achieve the desired outcome.",
        ),
        question(
            2,
            "Which of the following is NOT typically included in the initial prompt of the iterative process?",
            [
                "Basic subject identification",
                "Setting or environment",
                "Highly specific cultural details",
                "General time of day",
            ],
            2,
            "The initial prompt typically includes basic elements like subject, setting, and general attributes. Highly specific cultural details are usually added in later iterations as the image is refined.",
        ),
        question(
            3,
            "What is a key benefit of using iterative prompting versus trying to create a perfect single prompt?",
            [
                "It uses less computational resources",
                "It allows for learning from the AI's interpretation at each step",
                "It's always faster than single prompts",
                "It requires less creativity from the user",
            ],
            1,
            "A key benefit of iterative prompting is that it allows you to see how the AI interprets your instructions at each step, enabling you to make targeted improvements based on actual results rather than trying to predict everything in advance.",
        ),
        question(
            4,
            "When refining prompts for culturally specific imagery, what approach is most effective?",
            [
                "Using general terms that apply to all cultures",
                "Adding specific named elements, artifacts, and cultural context",
                "Focusing only on color schemes typical of that culture",
                "Using technical art terminology",
            ],
            1,
            "For culturally specific imagery, it's most effective to incorporate named elements (e.g., 'Gujarati bhungas' instead of just 'houses'), specific artifacts, traditional attire, and authentic contextual details that are unique to that culture.",
        ),
        question(
            5,
            "What should be the focus of the final iteration in the progressive prompting process?",
            [
                "Completely changing the concept if previous iterations aren't perfect",
                "Adding technical parameters like resolution and aspect ratio",
                "Fine details, atmosphere, lighting qualities, and stylistic elements",
                "Removing all specific details to let the AI be more creative",
            ],
            2,
            "The final iteration should focus on fine-tuning with specific details, atmosphere (like lighting and mood), and adding stylistic elements or artistic qualities that elevate the image to its final refined state.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(session: &mut QuizSession<'_>, option: usize) -> Option<AnswerOutcome> {
        session.select(option);
        let outcome = session.submit();
        session.next();
        outcome
    }

    #[test]
    fn test_perfect_run() {
        let questions = builtin_questions();
        let mut session = QuizSession::new(&questions);

        for q in &questions {
            let outcome = answer(&mut session, q.correct_option).unwrap();
            assert!(outcome.correct);
        }

        assert!(session.is_completed());
        assert_eq!(session.score(), 5);
        assert_eq!(session.verdict(), Some(Verdict::Perfect));
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_submit_requires_selection() {
        let questions = builtin_questions();
        let mut session = QuizSession::new(&questions);
        assert!(session.submit().is_none());
        assert!(!session.is_answered());
    }

    #[test]
    fn test_answer_locked_after_submit() {
        let questions = builtin_questions();
        let mut session = QuizSession::new(&questions);

        session.select(0);
        let outcome = session.submit().unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_option, 1);

        assert!(!session.select(1));
        assert_eq!(session.selected(), Some(0));
        assert!(session.submit().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let questions = builtin_questions();
        let mut session = QuizSession::new(&questions);
        assert!(!session.select(4));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_verdict_thresholds() {
        let questions = builtin_questions();

        // 3 of 5 correct: floor(0.7 * 5) = 3 -> Good
        let mut session = QuizSession::new(&questions);
        for (i, q) in questions.iter().enumerate() {
            let option = if i < 3 { q.correct_option } else { (q.correct_option + 1) % 4 };
            answer(&mut session, option);
        }
        assert_eq!(session.score(), 3);
        assert_eq!(session.verdict(), Some(Verdict::Good));

        session.reset();
        for q in &questions {
            answer(&mut session, (q.correct_option + 1) % 4);
        }
        assert_eq!(session.verdict(), Some(Verdict::KeepPracticing));
    }

    #[test]
    fn test_reset() {
        let questions = builtin_questions();
        let mut session = QuizSession::new(&questions);
        answer(&mut session, 1);
        assert_eq!(session.current_index(), 1);

        session.reset();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_completed());
        assert!(session.verdict().is_none());
    }

    #[test]
    fn test_check_answer() {
        let questions = builtin_questions();
        assert!(check_answer(&questions, 2, 2).unwrap().correct);
        assert_eq!(
            check_answer(&questions, 9, 0),
            Err(QuizError::UnknownQuestion(9))
        );
        assert_eq!(
            check_answer(&questions, 1, 7),
            Err(QuizError::InvalidOption {
                question: 1,
                option: 7,
                count: 4
            })
        );
    }

    #[test]
    fn test_grade_answers() {
        let questions = builtin_questions();
        let correct: Vec<usize> = questions.iter().map(|q| q.correct_option).collect();

        let result = grade(&questions, &correct).unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.verdict, Verdict::Perfect);
        assert_eq!(result.message, Verdict::Perfect.message());

        let wrong: Vec<usize> = correct.iter().map(|c| (c + 1) % 4).collect();
        let result = grade(&questions, &wrong).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.verdict, Verdict::KeepPracticing);
    }

    #[test]
    fn test_grade_rejects_bad_answers() {
        let questions = builtin_questions();
        assert_eq!(
            grade(&questions, &[1, 2]),
            Err(QuizError::Incomplete {
                answered: 2,
                total: 5
            })
        );
        assert_eq!(
            grade(&questions, &[1, 9, 1, 1, 2]),
            Err(QuizError::InvalidOption {
                question: 2,
                option: 9,
                count: 4
            })
        );
    }
}
