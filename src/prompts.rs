/// Full design prompt for one day's page.
///
/// `tired_section` is spliced in only when non-empty.
pub fn builder_prompt(
    today_human: &str,
    updated_utc: &str,
    articles_block: &str,
    recent_section: &str,
    tired_section: &str,
) -> String {
    let tired = if tired_section.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", tired_section)
    };

    format!(r#"# news.sys: Daily Page Designer

Today is {today}.

You design **news.sys**, a daily news page whose look responds to its content. You receive today's curated articles and return one complete, self-contained HTML file. The structure stays the same every day; the aesthetic voice changes.

---

## Today's Articles

{articles}
---

## Design Memory

{recent}
{tired}
---

## Required Elements

1. Header: site title "news.sys", subtitle "News by Claude", the date ("{today}"), and "{updated}".
2. Headlines: every article above, each expandable to its summary, with source attribution and a link. Expand/collapse uses `<details>` or vanilla JS only.
3. Designer's Notes at the bottom: a short, genuine reflection on today's design choices and anything you noticed across the stories.
4. Technical: a single HTML file with inline CSS and JS, responsive, semantic, keyboard-accessible, sufficient contrast. No external dependencies except Google Fonts.

---

## Design Process

1. Read every article. Name the dominant themes and the emotional register (heavy, hopeful, chaotic, mundane, surreal, urgent).
2. Commit to ONE aesthetic direction that answers today's news and differs from the recent designs above.
3. At the very top of the document write the design brief as an HTML comment, 2–4 sentences: the theme you found, the direction you chose, and one concrete visual choice that carries it:

```html
<!--
DESIGN BRIEF:
Today's stories circle around repair and rebuilding. I'm going with a
blueprint aesthetic: cyan grid paper, drafting-pen rules, and headlines
set like annotations on a technical drawing.
-->
```

Constants: information density over whitespace, and a functional, tool-like feel.
Variables: palette, display typography, SVG or ASCII ornament, background treatment, dividers, mood.

---

## Output Format

Return ONLY the HTML document, starting with the design brief comment and `<!DOCTYPE html>` and ending with `</html>`. No explanation before or after."#,
        today = today_human,
        updated = updated_utc,
        articles = articles_block,
        recent = recent_section,
        tired = tired,
    )
}
