use crate::chart::escape_text;
use crate::graphs::Canvas;
use crate::routes::{nav, DocSection, Page};
use std::fmt::Write;

pub fn render_page(page: Page) -> String {
    let (title, body) = match page {
        Page::Home => ("Dictionary Bot", HOME_BODY.to_string()),
        Page::Statistics => return render_statistics(std::iter::empty()),
        Page::Documentation(section) => (section.title(), render_documentation(section)),
    };
    render_layout(page, title, &body)
}

pub fn render_statistics<'a>(canvases: impl Iterator<Item = &'a Canvas>) -> String {
    let mut cards = String::new();
    for canvas in canvases {
        let (svg, summary) = match canvas.drawing() {
            Some(drawing) => (drawing.svg.as_str(), drawing.summary),
            None => ("", None),
        };
        let _ = write!(
            cards,
            r#"<div class="chart-card" id="{id}" data-drawn="{drawn}">{svg}"#,
            id = canvas.id,
            drawn = canvas.drawing().is_some(),
        );
        if let Some(summary) = summary {
            let _ = write!(
                cards,
                r#"<p class="summary">Minimum: {}<br>Maximum: {}<br>Average: {}</p>"#,
                summary.min, summary.max, summary.average
            );
        }
        cards.push_str("</div>");
    }

    let body = format!(
        r#"<header>
      <h1>Statistics</h1>
      <p class="subtitle">Usage of the bot, one point per day. Today is not counted until it is over.</p>
    </header>
    <section class="charts">{cards}</section>"#
    );
    render_layout(Page::Statistics, "Statistics", &body)
}

fn render_documentation(active: DocSection) -> String {
    let mut sidebar = String::new();
    for section in DocSection::ALL {
        let class = if section == active { "doc-link active" } else { "doc-link" };
        let _ = write!(
            sidebar,
            r#"<a class="{class}" href="{href}">{title}</a>"#,
            href = Page::Documentation(section).path(),
            title = section.title(),
        );
    }

    let content = match active {
        DocSection::Overview => DOCS_OVERVIEW,
        DocSection::GettingStarted => DOCS_GETTING_STARTED,
        DocSection::Commands => DOCS_COMMANDS,
        DocSection::Settings => DOCS_SETTINGS,
        DocSection::TextToSpeech => DOCS_TEXT_TO_SPEECH,
    };

    format!(
        r#"<header>
      <h1>Documentation</h1>
    </header>
    <section class="docs">
      <nav class="doc-nav">{sidebar}</nav>
      <article class="doc-body" id="{slug}"><h2>{title}</h2>{content}</article>
    </section>"#,
        slug = active.slug(),
        title = active.title(),
    )
}

fn render_layout(active: Page, title: &str, body: &str) -> String {
    let mut links = String::new();
    for (name, page) in nav() {
        let current = match (page, active) {
            (Page::Documentation(_), Page::Documentation(_)) => true,
            _ => page == active,
        };
        let _ = write!(
            links,
            r#"<a class="{class}" href="{href}">{name}</a>"#,
            class = if current { "tab active" } else { "tab" },
            href = page.path(),
        );
    }

    LAYOUT_HTML
        .replace("{{TITLE}}", &escape_text(title))
        .replace("{{NAV}}", &links)
        .replace("{{BODY}}", body)
}

const HOME_BODY: &str = r#"<header>
      <h1>Dictionary Bot</h1>
      <p class="subtitle">Look up definitions without leaving Discord, and have them read aloud in your voice channel.</p>
    </header>
    <section class="panel">
      <div class="stat">
        <span class="label">Define</span>
        <span class="value">/define</span>
        <p>Definitions from several dictionary APIs, tried in the order you prefer.</p>
      </div>
      <div class="stat">
        <span class="label">Listen</span>
        <span class="value">-v</span>
        <p>Text-to-speech reads the definition in the voice channel you are in.</p>
      </div>
      <div class="stat">
        <span class="label">Configure</span>
        <span class="value">/settings</span>
        <p>Prefix, language and dictionary sources per server or per channel.</p>
      </div>
    </section>
    <section class="actions">
      <a class="button primary" href="/documentation/getting-started">Get started</a>
      <a class="button" href="/statistics">See the numbers</a>
    </section>"#;

const DOCS_OVERVIEW: &str = r#"<p>Dictionary Bot answers definition requests in text channels and can read them out in voice channels. Every command is available both with the text prefix and as a slash command.</p>
<p>Pick a section on the left to learn how to invite the bot, which commands exist and what each setting changes.</p>"#;

const DOCS_GETTING_STARTED: &str = r#"<ol>
<li>Invite the bot to your server with permission to read and send messages. Voice features also need <em>Connect</em> and <em>Speak</em>.</li>
<li>Type <code>.define hello</code> or <code>/define word:hello</code> in any channel the bot can see.</li>
<li>Forgot the prefix? Mention the bot and it replies with the current one.</li>
</ol>"#;

const DOCS_COMMANDS: &str = r#"<dl>
<dt><code>define [-v] [-lang &lt;language&gt;] &lt;word&gt;</code></dt>
<dd>Gets the definition of a word and optionally reads it out to you. Alias <code>d</code>.</dd>
<dt><code>stop</code></dt>
<dd>Makes the bot stop talking. Alias <code>s</code>.</dd>
<dt><code>voices</code></dt>
<dd>Shows a list of supported voices for text to speech. Aliases <code>voice</code>, <code>v</code>.</dd>
<dt><code>settings set|list|remove</code></dt>
<dd>Change the bot's properties for a channel or server.</dd>
<dt><code>help</code></dt>
<dd>Shows you a helpful message. Alias <code>h</code>.</dd>
</dl>"#;

const DOCS_SETTINGS: &str = r#"<p>Settings can be scoped to a whole server or a single channel. Channel settings win over server settings.</p>
<dl>
<dt><code>prefix</code> (default <code>.</code>)</dt>
<dd>The bot's prefix. This can be one or more characters.</dd>
<dt><code>text_to_speech</code> (default <code>flag</code>)</dt>
<dd><code>force</code> reads every definition, <code>flag</code> reads only when <code>-v</code> is given, <code>disable</code> turns it off.</dd>
<dt><code>language</code> (default <code>en-us-wavenet-c</code>)</dt>
<dd>The language to use when displaying definitions and speaking. A two-letter language code or a language name.</dd>
<dt><code>show_definition_source</code> (default <code>false</code>)</dt>
<dd>Show which dictionary answered at the end of each definition.</dd>
<dt><code>dictionary_apis</code></dt>
<dd>Comma-separated list of dictionary APIs in order of preference: <code>unofficial_google</code>, <code>owlbot</code>, <code>merriam_webster_collegiate</code>, <code>merriam_webster_medical</code>, <code>rapid_words</code>.</dd>
</dl>"#;

const DOCS_TEXT_TO_SPEECH: &str = r#"<p>Join a voice channel and add <code>-v</code> to a define command, or pass <code>text_to_speech:true</code> to the slash command. The bot joins your channel, reads the definition and leaves.</p>
<p>Use <code>-lang</code> to pick a voice for one request, or the <code>language</code> setting to change the default. <code>voices</code> lists everything available. <code>stop</code> interrupts playback.</p>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #1d2430;
      --bg-2: #2f4858;
      --ink: whitesmoke;
      --muted: #a9b3bd;
      --accent: #4bc0c0;
      --card: rgba(255, 255, 255, 0.06);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #222b38 60%, #1a1f28 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .site-nav {
      width: min(1100px, 100%);
      display: flex;
      gap: 6px;
      padding: 6px;
      margin-bottom: 24px;
      background: var(--card);
      border-radius: 999px;
    }

    .tab,
    .button {
      color: var(--muted);
      text-decoration: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
    }

    .tab.active,
    .button.primary {
      background: var(--accent);
      color: #14202a;
    }

    .button {
      border: 1px solid var(--accent);
      padding: 14px 20px;
    }

    .app {
      width: min(1100px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .panel,
    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .charts {
      grid-template-columns: repeat(auto-fit, minmax(460px, 1fr));
    }

    .stat,
    .chart-card {
      background: rgba(0, 0, 0, 0.2);
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(255, 255, 255, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
    }

    .chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      fill: var(--ink);
    }

    .chart .chart-title {
      font-size: 14px;
      font-weight: 600;
    }

    .chart-line {
      fill: none;
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(255, 255, 255, 0.1);
    }

    .chart .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .summary {
      margin: 12px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .docs {
      display: grid;
      grid-template-columns: 200px 1fr;
      gap: 24px;
    }

    .doc-nav {
      display: grid;
      align-content: start;
      gap: 6px;
    }

    .doc-link {
      color: var(--muted);
      text-decoration: none;
      padding: 6px 10px;
      border-radius: 10px;
    }

    .doc-link.active {
      background: rgba(75, 192, 192, 0.15);
      color: var(--ink);
    }

    code {
      color: var(--accent);
    }

    dt {
      margin-top: 12px;
    }

    dd {
      margin-left: 18px;
      color: var(--muted);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .docs,
      .charts {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <nav class="site-nav">{{NAV}}</nav>
  <main class="app">
    {{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_marks_its_tab_active() {
        let html = render_page(Page::Home);
        assert!(html.contains("<title>Dictionary Bot</title>"));
        assert!(html.contains(r#"<a class="tab active" href="/">Home</a>"#));
        assert!(html.contains(r#"<a class="tab" href="/statistics">Statistics</a>"#));
    }

    #[test]
    fn documentation_highlights_section_and_nav() {
        let html = render_page(Page::Documentation(DocSection::Settings));
        assert!(html.contains(r#"<a class="tab active" href="/documentation">Documentation</a>"#));
        assert!(
            html.contains(r#"<a class="doc-link active" href="/documentation/settings">Settings</a>"#)
        );
        assert!(html.contains("dictionary_apis"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn statistics_renders_empty_canvases() {
        let dashboard = crate::graphs::Dashboard::standard(&crate::config::Config::default());
        let html = render_statistics(dashboard.canvases());
        assert!(html.contains(r#"id="requests_per_day_canvas" data-drawn="false""#));
        assert!(html.contains(r#"id="active_guilds_canvas" data-drawn="false""#));
        assert!(!html.contains("Minimum:"));
    }
}
