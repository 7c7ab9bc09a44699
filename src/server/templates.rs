use minijinja::{Environment, Template};
use once_cell::sync::Lazy;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{error, info};

use crate::error::AppResult;

static TEMPLATES_ENVIRONMENT: Lazy<Environment> = Lazy::new(|| {
    info!("Initializing templating engine environment.");
    let mut env = Environment::new();

    // Use strum to iterate over the variants of the enum.
    for template in PageTemplate::iter() {
        if let Err(e) = env.add_template(template.name(), template.template()) {
            error!("Could not load template '{}'. {e}", template.name());
        }
    }

    info!("Templates loaded in templating engine environment.");

    env
});

#[derive(EnumIter)]
pub enum PageTemplate {
    Layout,
    GameCard,
    Leaderboard,
}

impl PageTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            PageTemplate::Layout => "layout.html",
            PageTemplate::GameCard => "game_card.html",
            PageTemplate::Leaderboard => "leaderboard.html",
        }
    }

    pub fn get(&self) -> AppResult<Template<'static, 'static>> {
        Ok(TEMPLATES_ENVIRONMENT.get_template(self.name())?)
    }

    pub fn template(&self) -> &'static str {
        match self {
            PageTemplate::Layout => {
                r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta http-equiv="refresh" content="{{ refresh_sec }}">
  <title>{% block title %}Blox Charts{% endblock %}</title>
  <style>
    body { font-family: system-ui, sans-serif; background: #0f1117; color: #e6e6e6; margin: 0; }
    header, main, footer { max-width: 1100px; margin: 0 auto; padding: 1rem; }
    nav a { color: #9aa4b2; margin-right: 1rem; text-decoration: none; }
    nav a.active { color: #fff; border-bottom: 2px solid #00b06f; }
    .notice { background: #3a2f0b; border-radius: 6px; padding: .5rem 1rem; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1rem; }
    .card { background: #191c24; border-radius: 8px; overflow: hidden; }
    .card img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; background: #222; }
    .card .body { padding: .75rem; }
    .card a { color: inherit; text-decoration: none; }
    .rank { color: #00b06f; font-weight: bold; }
    .muted { color: #9aa4b2; font-size: .85rem; }
  </style>
</head>
<body>
  <header>{% block header %}{% endblock %}</header>
  <main>{% block content %}{% endblock %}</main>
  <footer class="muted">Updated {{ updated }} · next update {{ next_update }}</footer>
</body>
</html>"#
            }
            PageTemplate::GameCard => {
                r#"<article class="card">
  <a href="{{ game.url }}" target="_blank" rel="noopener">
    {% if game.thumbnail %}<img src="{{ game.thumbnail }}" alt="{{ game.name }}">{% else %}<img alt="">{% endif %}
    <div class="body">
      <div><span class="rank">{{ game.rank }}</span> {{ game.name }}</div>
      <div class="muted">by {{ game.creator }}{% if game.creator_type == "Group" %} (group){% endif %} · {{ game.genre }}</div>
      <div>👥 {{ game.players }} playing · 👍 {{ game.rating }}%</div>
      <div class="muted">{{ game.visits }} visits · {{ game.favorites }} favorites</div>
    </div>
  </a>
</article>"#
            }
            PageTemplate::Leaderboard => {
                r#"{% extends "layout.html" %}
{% block title %}{{ title }} · Blox Charts{% endblock %}
{% block header %}
  <h1>{{ title }}</h1>
  <nav>
  {%- for tab in tabs %}
    <a href="/?category={{ tab.slug }}&limit={{ limit }}"{% if tab.active %} class="active"{% endif %}>{{ tab.title }}</a>
  {%- endfor %}
  </nav>
{% endblock %}
{% block content %}
  {% if fallback %}<p class="notice">Live data is unavailable right now, showing sample data.</p>{% endif %}
  {% if approximate %}<p class="muted">This ranking is an approximation built from public counters.</p>{% endif %}
  {% if games %}
  <section class="grid">
    {%- for game in games %}
    {% include "game_card.html" %}
    {%- endfor %}
  </section>
  {% else %}
  <p>No games to show yet, try again in a moment.</p>
  {% endif %}
{% endblock %}"#
            }
        }
    }
}
