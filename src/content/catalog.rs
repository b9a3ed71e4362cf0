//! Built-in tutorial catalog
//!
//! Everything here is constructed once at startup and shared read-only.

use super::{ContentError, Example, Iteration, IterationSequence, Prompt, Segment};
use crate::quiz::QuizQuestion;
use serde::Serialize;

/// Headline copy for the tutorial
#[derive(Debug, Clone, Serialize)]
pub struct TutorialInfo {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub sections: Vec<TutorialSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TutorialSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// One step of the iterative prompting technique
#[derive(Debug, Clone, Serialize)]
pub struct TechniqueStep {
    pub step: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceItem {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceCategory {
    pub title: String,
    pub icon: String,
    pub items: Vec<ResourceItem>,
}

/// One stage of the creative-writing challenge
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeStep {
    pub step: u32,
    pub title: String,
    pub instruction: String,
    pub example_prompt: Prompt,
    pub outcome: String,
}

/// All static tutorial content
#[derive(Debug, Clone)]
pub struct Catalog {
    pub tutorial: TutorialInfo,
    pub examples: Vec<Example>,
    pub technique: Vec<TechniqueStep>,
    pub resources: Vec<ResourceCategory>,
    pub quiz: Vec<QuizQuestion>,
    pub challenge: Vec<ChallengeStep>,
}

impl Catalog {
    /// Look up an example by id
    pub fn example(&self, id: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.id == id)
    }

    /// Id of the example shown first
    pub fn default_example_id(&self) -> Option<&str> {
        self.examples.first().map(|e| e.id.as_str())
    }

    /// The catalog shipped with the tutorial
    pub fn builtin() -> Result<Self, ContentError> {
        Ok(Self {
            tutorial: tutorial_info(),
            examples: vec![rann_utsav()?],
            technique: technique_steps(),
            resources: resource_categories(),
            quiz: crate::quiz::builtin_questions(),
            challenge: challenge_steps(),
        })
    }
}

fn s(text: &str) -> String {
    text.to_string()
}

fn tutorial_info() -> TutorialInfo {
    TutorialInfo {
        title: s("AI Artistry Unveiled: A Gujarati Journey into Detail"),
        subtitle: s("Explore the art of iterative and progressive detail prompting through the vibrant lens of Gujarati culture."),
        description: s("Learn how to transform basic AI-generated images into stunning, culturally rich masterpieces using the iterative detail prompting technique."),
        sections: vec![
            TutorialSection {
                id: s("introduction"),
                title: s("Bridging AI and Cultural Heritage"),
                content: s("Discover how iterative prompting can help AI models better understand and represent the rich cultural nuances of Gujarat."),
            },
            TutorialSection {
                id: s("technique"),
                title: s("Mastering Iterative & Progressive Detail Prompting"),
                content: s("The process involves starting with a basic concept and gradually refining it with increasingly specific details that guide the AI to produce more authentic and culturally accurate imagery."),
            },
            TutorialSection {
                id: s("examples"),
                title: s("Iterative Examples Gallery"),
                content: s("Explore real examples showing how prompt iteration transforms AI-generated imagery, enhancing cultural accuracy and visual appeal."),
            },
        ],
    }
}

fn rann_utsav() -> Result<Example, ContentError> {
    let iterations = vec![
        Iteration {
            prompt: Prompt::plain("Rann Utsav festival, white desert landscape, tents, daytime."),
            analysis: s("As expected, a fairly generic scene. The AI provides a basic representation of a desert with some tents, but it lacks the specific cultural elements that make Rann Utsav unique. The colors are muted, the tents are generic, and there is no indication of Gujarati cultural elements."),
            image_ref: s("https://images.unsplash.com/photo-1496080174650-637e3f22fa03?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80"),
            image_alt: s("Initial AI generation of Rann Utsav with basic tents in a desert"),
            caption: Some(s("Initial AI generation based on basic prompt")),
        },
        Iteration {
            prompt: Prompt::new(vec![
                Segment::plain("Vibrant "),
                Segment::emphasized("Rann Utsav festival in Kutch, Gujarat"),
                Segment::plain(", white desert landscape, "),
                Segment::emphasized("colorful traditional Gujarati bhungas"),
                Segment::plain(" and "),
                Segment::emphasized("decorated circular tents"),
                Segment::plain(", "),
                Segment::emphasized("golden sunset"),
                Segment::plain(" light."),
            ]),
            analysis: s("Much better! We see the colorful Kutchi tents and bhungas (traditional round houses) with their distinctive decorative elements. The golden sunset creates a warm atmosphere, and the AI has captured some of the vibrancy of the festival. However, it still lacks some specific cultural details and activities that would make it truly authentic."),
            image_ref: s("https://images.unsplash.com/photo-1529516548873-9ce57c8f155e?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80"),
            image_alt: s("Improved AI generation showing colorful tents at Rann Utsav during sunset"),
            caption: Some(s("Improved generation with specified cultural elements")),
        },
        Iteration {
            prompt: Prompt::new(vec![
                Segment::plain("Vibrant Rann Utsav festival in Kutch, Gujarat, "),
                Segment::emphasized("vast white salt desert of Rann of Kutch"),
                Segment::plain(", colorful traditional Gujarati bhungas and decorated circular tents, golden sunset light, "),
                Segment::emphasized("local artisans displaying mirror-work embroidery and bandhani textiles"),
                Segment::plain(", "),
                Segment::emphasized("camel silhouettes"),
                Segment::plain(", "),
                Segment::emphasized("folk dancers in traditional Gujarati attire with ghagra choli"),
                Segment::plain(", "),
                Segment::emphasized("photorealistic, detailed"),
                Segment::plain("."),
            ]),
            analysis: s("Perfect! The image now contains all the essential elements that make Rann Utsav culturally authentic. We can see the distinctive white salt desert, traditional Gujarati bhungas with mirror work decorations, folk dancers in traditional attire, artisans displaying their crafts, and even camel silhouettes against the sunset. The photorealistic quality brings the scene to life with rich details."),
            image_ref: s("https://pixabay.com/get/g2a45b323b1b3384ef3793fecb101249f958421b1322ce83138619ea17aa2fa85985b3cbecd7ca3e53497e62329ac0d19b20ad61ccf2a2572278d290eb61f6907_1280.jpg"),
            image_alt: s("Final detailed AI generation showing authentic Rann Utsav with folk dancers, artisans, and traditional elements"),
            caption: Some(s("Final detailed generation with complete cultural context")),
        },
    ];

    Ok(Example {
        id: s("rann-utsav"),
        title: s("Rann Utsav Festival at Sunset"),
        description: s("Watch how we transform a basic festival scene into a culturally authentic representation of Gujarat's famous Rann Utsav celebration."),
        iterations: IterationSequence::new("rann-utsav", iterations)?,
    })
}

fn technique_steps() -> Vec<TechniqueStep> {
    [
        ("Begin with Basic Concepts", "Start with a simple prompt that outlines the general scene or subject you want to generate."),
        ("Analyze Initial Results", "Review the AI's output and identify areas where cultural details or accuracy can be improved."),
        ("Add Specific Details", "Enhance your prompt with cultural terminology, specific colors, patterns, or contextual elements."),
        ("Refine and Repeat", "Continue the iterative process until the AI generates an image that authentically represents the cultural elements you're aiming for."),
    ]
    .iter()
    .zip(1..)
    .map(|((title, description), step)| TechniqueStep {
        step,
        title: s(title),
        description: s(description),
    })
    .collect()
}

fn items(entries: &[(&str, &str, &str)]) -> Vec<ResourceItem> {
    entries
        .iter()
        .map(|(title, description, icon)| ResourceItem {
            title: s(title),
            description: s(description),
            icon: s(icon),
        })
        .collect()
}

fn resource_categories() -> Vec<ResourceCategory> {
    vec![
        ResourceCategory {
            title: s("AI Prompting Techniques"),
            icon: s("robot"),
            items: items(&[
                ("The Art of Prompt Engineering", "A comprehensive guide to crafting effective prompts for various AI image generation models.", "article"),
                ("Video Tutorial: Progressive Prompting", "A step-by-step visual guide to the iterative prompting technique with multiple examples.", "video"),
                ("Prompting Dictionary", "A collection of technical terms and descriptive phrases that significantly improve AI image generation.", "book-open"),
                ("AI Artistry Community", "Join our community of AI artists sharing techniques, prompts, and feedback on cultural representations.", "community"),
            ]),
        },
        ResourceCategory {
            title: s("Gujarati Cultural Elements"),
            icon: s("gallery"),
            items: items(&[
                ("Visual Guide to Gujarati Textiles", "Learn about bandhani, patola, ajrakh, and other traditional textile patterns from Gujarat.", "book-2"),
                ("Architecture of Gujarat", "Explore the distinctive architectural styles from different regions of Gujarat, including havelis and bhungas.", "building"),
                ("Festival Glossary", "A comprehensive guide to major Gujarati festivals, their significance, and visual elements.", "calendar-event"),
                ("Cultural Sensitivity Guide", "Best practices for respectful and accurate representation of Gujarati cultural elements in AI art.", "heart"),
            ]),
        },
    ]
}

fn challenge_steps() -> Vec<ChallengeStep> {
    const BASE: &str = "A mythical bird creature with a peacock's tail that guards ancient Gujarati temples";
    const DETAILS: &str = ", with a golden crest on its head, eyes that glow like emeralds, and the ability to summon protective fire";
    const CONTEXT: &str = ", perched on an intricately carved stone archway, surrounded by mirror work patterns typical of Kutch region, in the style of traditional Indian miniature painting, warm sunset lighting";

    vec![
        ChallengeStep {
            step: 1,
            title: s("Basic Concept"),
            instruction: s("Start with a simple prompt describing the general type of creature (e.g., \"A mythical guardian lion with wings\")."),
            example_prompt: Prompt::plain(BASE),
            outcome: s("Establishes the base concept"),
        },
        ChallengeStep {
            step: 2,
            title: s("Add Specific Details"),
            instruction: s("Enhance your prompt with specific physical characteristics and abilities to make it more unique."),
            example_prompt: Prompt::new(vec![Segment::plain(BASE), Segment::emphasized(DETAILS)]),
            outcome: s("Adds distinctive features and abilities"),
        },
        ChallengeStep {
            step: 3,
            title: s("Cultural Context & Style"),
            instruction: s("Add cultural context, environmental elements, and specify an artistic style for the final iteration."),
            example_prompt: Prompt::new(vec![
                Segment::plain(BASE),
                Segment::plain(DETAILS),
                Segment::emphasized(CONTEXT),
            ]),
            outcome: s("Completes with cultural authenticity"),
        },
    ]
}
