//! Tutorial page
//!
//! Server-renders the first iteration of every example so the gallery
//! works without scripts; the embedded script handles tab navigation, the
//! quiz and the newsletter form through the JSON API.

use crate::content::Catalog;
use crate::diff::escape_html;
use crate::navigation::IterationView;
use crate::theme::{StyleSheet, Theme};

/// Render the full tutorial page
pub fn render_page(catalog: &Catalog) -> String {
    let sheet = StyleSheet::new();
    let _theme = sheet.apply(&Theme::tutorial());

    PAGE_HTML
        .replace("{{THEME}}", &sheet.render())
        .replace("{{TITLE}}", &escape_html(&catalog.tutorial.title))
        .replace("{{SUBTITLE}}", &escape_html(&catalog.tutorial.subtitle))
        .replace("{{DESCRIPTION}}", &escape_html(&catalog.tutorial.description))
        .replace("{{TECHNIQUE}}", &render_technique(catalog))
        .replace("{{GALLERY}}", &render_gallery(catalog))
        .replace("{{RESOURCES}}", &render_resources(catalog))
}

fn render_technique(catalog: &Catalog) -> String {
    catalog
        .technique
        .iter()
        .map(|s| {
            format!(
                "<li><strong>{}. {}</strong><p>{}</p></li>",
                s.step,
                escape_html(&s.title),
                escape_html(&s.description)
            )
        })
        .collect()
}

fn render_gallery(catalog: &Catalog) -> String {
    let mut html = String::new();
    for example in &catalog.examples {
        let Some(view) = IterationView::build(example, 0) else {
            continue;
        };

        let tabs: String = (1..=example.iterations.len())
            .map(|n| {
                format!(
                    "<button class=\"tab{}\" data-example=\"{}\" data-index=\"{}\">Iteration {}</button>",
                    if n == 1 { " active" } else { "" },
                    escape_html(&example.id),
                    n,
                    n
                )
            })
            .collect();

        html.push_str(&format!(
            r#"<article class="example" id="example-{id}">
    <h3>{title}</h3>
    <p>{description}</p>
    <div class="tabs">{tabs}</div>
    <div class="iteration">
        <img src="{image}" alt="{alt}">
        <p class="caption">{caption}</p>
        <h4>Prompt Text</h4>
        <p class="prompt">{prompt}</p>
        <p class="summary"></p>
        <h4>Analysis</h4>
        <p class="analysis">{analysis}</p>
    </div>
</article>
"#,
            id = escape_html(&example.id),
            title = escape_html(&example.title),
            description = escape_html(&example.description),
            tabs = tabs,
            image = escape_html(&view.image_ref),
            alt = escape_html(&view.image_alt),
            caption = escape_html(view.caption.as_deref().unwrap_or("")),
            prompt = view.highlighted_prompt,
            analysis = escape_html(&view.analysis),
        ));
    }
    html
}

fn render_resources(catalog: &Catalog) -> String {
    catalog
        .resources
        .iter()
        .map(|c| {
            let items: String = c
                .items
                .iter()
                .map(|i| {
                    format!(
                        "<li><strong>{}</strong> {}</li>",
                        escape_html(&i.title),
                        escape_html(&i.description)
                    )
                })
                .collect();
            format!(
                "<div class=\"category\"><h3>{}</h3><ul>{}</ul></div>",
                escape_html(&c.title),
                items
            )
        })
        .collect()
}

const PAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{TITLE}}</title>
    {{THEME}}
    <style>
        * { box-sizing: border-box; }
        body { font-family: system-ui, sans-serif; margin: 0; line-height: 1.5; }
        .container { max-width: 1100px; margin: 0 auto; padding: 20px; }
        section { margin-bottom: 48px; }
        .tabs { display: flex; gap: 4px; margin-bottom: 16px; }
        .tab { border: 1px solid var(--primary); background: white; padding: 8px 18px; cursor: pointer; }
        .tab.active { background: var(--primary); color: white; }
        .iteration img { width: 100%; max-width: 640px; border-radius: 12px; }
        .prompt { background: white; padding: 12px; border-radius: 6px; }
        .caption, .summary { font-style: italic; opacity: 0.75; }
        .quiz-option { display: block; margin: 6px 0; }
        .correct { color: var(--accent); }
        .wrong { color: var(--primary); }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{{TITLE}}</h1>
            <p>{{SUBTITLE}}</p>
            <p>{{DESCRIPTION}}</p>
        </header>

        <section id="technique">
            <h2>Mastering Iterative &amp; Progressive Detail Prompting</h2>
            <ol>{{TECHNIQUE}}</ol>
        </section>

        <section id="examples">
            <h2>Iterative Examples Gallery</h2>
            {{GALLERY}}
        </section>

        <section id="quiz">
            <h2>Test Your Knowledge</h2>
            <div id="quizBox"></div>
        </section>

        <section id="resources">
            <h2>Resources &amp; Further Learning</h2>
            {{RESOURCES}}
            <form id="subscribeForm">
                <input type="email" id="email" placeholder="you@example.com">
                <button type="submit">Subscribe</button>
                <span id="subscribeResult"></span>
            </form>
        </section>
    </div>
    <script>
        document.querySelectorAll('.tab').forEach(tab => {
            tab.addEventListener('click', async () => {
                const id = tab.dataset.example;
                const root = document.getElementById('example-' + id);
                const res = await fetch(`/api/examples/${id}/iterations/${tab.dataset.index}`);
                if (!res.ok) return;
                const view = await res.json();

                root.querySelectorAll('.tab').forEach(t => t.classList.toggle('active', t === tab));
                root.querySelector('img').src = view.image_ref;
                root.querySelector('img').alt = view.image_alt;
                root.querySelector('.caption').textContent = view.caption || '';
                root.querySelector('.prompt').innerHTML = view.highlighted_prompt;
                root.querySelector('.analysis').textContent = view.analysis;
                root.querySelector('.summary').textContent = view.summary
                    ? `${view.summary.new_words} new words added since iteration ${view.index}`
                    : '';
            });
        });

        let quiz = { questions: [], current: 0, answers: [] };

        async function loadQuiz() {
            const res = await fetch('/api/quiz');
            quiz.questions = (await res.json()).questions;
            renderQuestion();
        }

        function paragraph(text) {
            const p = document.createElement('p');
            p.textContent = text;
            return p;
        }

        async function showResult(box) {
            const res = await fetch('/api/quiz/result', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ answers: quiz.answers })
            });
            const result = await res.json();
            if (!res.ok) {
                box.replaceChildren(paragraph(result.message));
                return;
            }
            box.replaceChildren(
                paragraph(`Your score: ${result.score} out of ${result.total}`),
                paragraph(result.message)
            );
        }

        function renderQuestion() {
            const box = document.getElementById('quizBox');
            if (quiz.current >= quiz.questions.length) {
                showResult(box);
                return;
            }
            const q = quiz.questions[quiz.current];
            const title = document.createElement('strong');
            title.textContent = `${quiz.current + 1}. ${q.question}`;
            const heading = document.createElement('p');
            heading.appendChild(title);
            const buttons = q.options.map((o, i) => {
                const btn = document.createElement('button');
                btn.className = 'quiz-option';
                btn.textContent = o;
                btn.addEventListener('click', () => answer(q.id, i), { once: true });
                return btn;
            });
            const feedback = document.createElement('p');
            feedback.id = 'quizFeedback';
            box.replaceChildren(heading, ...buttons, feedback);
        }

        async function answer(questionId, option) {
            const res = await fetch('/api/quiz/answer', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ question_id: questionId, option })
            });
            const outcome = await res.json();
            quiz.answers.push(option);
            document.querySelectorAll('.quiz-option').forEach(b => b.disabled = true);
            const feedback = document.getElementById('quizFeedback');
            feedback.className = outcome.correct ? 'correct' : 'wrong';
            feedback.textContent = outcome.explanation;
            const next = document.createElement('button');
            next.textContent = 'Next';
            next.onclick = () => { quiz.current++; renderQuestion(); };
            feedback.after(next);
        }

        document.getElementById('subscribeForm').addEventListener('submit', async e => {
            e.preventDefault();
            const res = await fetch('/api/subscribe', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ email: document.getElementById('email').value })
            });
            document.getElementById('subscribeResult').textContent = (await res.json()).message;
        });

        loadQuiz();
    </script>
</body>
</html>
"##;
