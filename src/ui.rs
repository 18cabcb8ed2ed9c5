use crate::chart::ChartBoard;
use crate::format::format_compact;
use crate::models::ElasticityResponse;
use chrono::Local;

pub fn render_index(board: &ChartBoard, elasticity: Option<&ElasticityResponse>) -> String {
    let (value, details) = match elasticity {
        Some(response) => (response.report.elasticity.clone(), elasticity_details(response)),
        None => (
            "--".to_string(),
            "<p>Elasticity is unavailable for this dataset.</p>".to_string(),
        ),
    };

    INDEX_HTML
        .replace("{{MARKET}}", &escape(&board.market))
        .replace("{{ACTIVE}}", &escape(&board.active_scenario))
        .replace("{{GENERATED}}", &Local::now().format("%Y-%m-%d %H:%M").to_string())
        .replace("{{ELASTICITY}}", &escape(&value))
        .replace("{{ELASTICITY_DETAILS}}", &details)
}

fn elasticity_details(response: &ElasticityResponse) -> String {
    let (base, compare, report) = (response.base_year, response.compare_year, &response.report);
    [
        format!("Impressions Change ({base}-{compare}): {}", report.impressions_change),
        format!("Travel Queries Change ({base}-{compare}): {}", report.queries_change),
        format!("Total Impressions {base}: {}", format_compact(report.total_impressions_base)),
        format!("Total Impressions {compare}: {}", format_compact(report.total_impressions_compare)),
        format!("Avg Travel Queries {base}: {}", report.avg_queries_base),
        format!("Avg Travel Queries {compare}: {}", report.avg_queries_compare),
    ]
    .iter()
    .map(|line| format!("<p>{}</p>", escape(line)))
    .collect::<Vec<_>>()
    .join("\n          ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin;
    use crate::elasticity::media_elasticity;

    #[test]
    fn index_embeds_elasticity_and_market() {
        let data = builtin();
        let board = ChartBoard::new(&data).unwrap();
        let response = ElasticityResponse {
            base_year: 2024,
            compare_year: 2025,
            scenario: "moderate".into(),
            report: media_elasticity(&data, 2024, 2025, "moderate").unwrap().report(),
        };

        let html = render_index(&board, Some(&response));
        assert!(html.contains("Kazakhstan Market Dashboard"));
        assert!(html.contains(r#"<div class="elasticity-value" id="elasticity-value">0.09</div>"#));
        assert!(html.contains("<p>Total Impressions 2025: 713.8M</p>"));
        assert!(html.contains("<p>Impressions Change (2024-2025): 334.8%</p>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn detail_labels_follow_compared_years() {
        let data = builtin();
        let response = ElasticityResponse {
            base_year: 2023,
            compare_year: 2025,
            scenario: "ambitious".into(),
            report: media_elasticity(&data, 2023, 2025, "ambitious").unwrap().report(),
        };

        let details = elasticity_details(&response);
        assert!(details.contains("Travel Queries Change (2023-2025):"));
        assert!(details.contains("Total Impressions 2023: 164.1M"));
        assert!(details.contains("Avg Travel Queries 2025: 6.17"));
        assert!(!details.contains("2024"));
    }

    #[test]
    fn index_renders_without_elasticity() {
        let board = ChartBoard::new(&builtin()).unwrap();
        let html = render_index(&board, None);
        assert!(html.contains("Elasticity is unavailable"));
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{MARKET}} Market Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap');

    :root {
      --bg: #f4f6f9;
      --ink: #1f2933;
      --muted: #6b7785;
      --card: #ffffff;
      --accent: #4bc0c0;
      --accent-2: #ff9f40;
      --accent-3: #36a2eb;
      --shadow: 0 18px 40px rgba(31, 41, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: rgba(31, 41, 51, 0.06);
      color: var(--ink);
    }

    button.active {
      background: var(--ink);
      color: white;
    }

    .print-btn {
      background: var(--accent);
      color: white;
    }

    .tabs,
    .scenarios {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .tab-content {
      display: none;
      gap: 20px;
    }

    .tab-content.active {
      display: grid;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 20px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 12px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-grid {
      stroke: rgba(0, 0, 0, 0.05);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .legend {
      display: flex;
      gap: 16px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
      background: var(--swatch);
    }

    .elasticity-value {
      font-size: 3rem;
      font-weight: 700;
      color: var(--accent);
    }

    .elasticity-details p {
      margin: 4px 0;
      color: var(--muted);
    }

    .status {
      min-height: 1.2em;
      color: #c63b2b;
    }

    footer {
      color: var(--muted);
      font-size: 0.85rem;
    }

    @media print {
      .tabs,
      .scenarios,
      .print-btn {
        display: none;
      }
      .tab-content {
        display: grid;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>{{MARKET}} Market Dashboard</h1>
        <p class="subtitle">Travel demand, media impressions and forecast scenarios, 2023-2025.</p>
      </div>
      <button class="print-btn" type="button">Print report</button>
    </header>

    <nav class="tabs" role="tablist">
      <button class="tab-btn active" type="button" data-tab="overview">Overview</button>
      <button class="tab-btn" type="button" data-tab="trends">Market Trends</button>
      <button class="tab-btn" type="button" data-tab="advanced-insights">Advanced Insights</button>
    </nav>

    <section id="overview-tab" class="tab-content active">
      <div class="card">
        <h2 id="queries-chart-title">Travel Queries Forecast</h2>
        <div class="scenarios" id="scenarios" data-active="{{ACTIVE}}"></div>
        <svg id="queries-chart" class="chart" viewBox="0 0 700 300" role="img"></svg>
        <div class="legend" id="queries-chart-legend"></div>
      </div>
      <div class="card">
        <h2 id="impressions-chart-title">Media Impressions</h2>
        <svg id="impressions-chart" class="chart" viewBox="0 0 700 300" role="img"></svg>
        <div class="legend" id="impressions-chart-legend"></div>
      </div>
    </section>

    <section id="trends-tab" class="tab-content">
      <div class="card">
        <h2 id="flights-chart-title">Flight Searches</h2>
        <svg id="flights-chart" class="chart" viewBox="0 0 700 300" role="img"></svg>
        <div class="legend" id="flights-chart-legend"></div>
      </div>
      <div class="card">
        <h2 id="hotel-chart-title">Hotel Guests</h2>
        <svg id="hotel-chart" class="chart" viewBox="0 0 700 300" role="img"></svg>
        <div class="legend" id="hotel-chart-legend"></div>
      </div>
    </section>

    <section id="advanced-insights-tab" class="tab-content">
      <div class="card" id="elasticity-container">
        <h2>Media Elasticity (Travel Queries / Impressions)</h2>
        <div class="elasticity-value" id="elasticity-value">{{ELASTICITY}}</div>
        <div class="elasticity-details">
          {{ELASTICITY_DETAILS}}
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
    <footer>Generated {{GENERATED}}</footer>
  </main>

  <script>
    const COLORS = ['#ff9f40', '#4bc0c0', '#36a2eb', '#ffce56'];
    const statusEl = document.getElementById('status');
    const scenariosEl = document.getElementById('scenarios');

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const formatCompact = (value) => {
      if (value >= 1000000) return (value / 1000000).toFixed(1) + 'M';
      if (value >= 1000) return (value / 1000).toFixed(1) + 'K';
      return Math.round(value * 100) / 100;
    };

    const renderChart = (spec, colors) => {
      const chartEl = document.getElementById(spec.id);
      const legendEl = document.getElementById(`${spec.id}-legend`);
      document.getElementById(`${spec.id}-title`).textContent = spec.title;

      const width = 700;
      const height = 300;
      const paddingX = 56;
      const paddingY = 34;
      const top = 20;

      const values = spec.datasets.flatMap((dataset) => dataset.series);
      let max = Math.max(0, ...values);
      if (max === 0) {
        max = 1;
      }

      const xStep = (width - paddingX * 2) / (spec.labels.length - 1);
      const scaleY = (height - top - paddingY) / max;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - value * scaleY;

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${formatCompact(value)}</text>`;
      }

      const xLabels = spec.labels
        .map((label, index) => `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label}</text>`)
        .join('');

      const lines = spec.datasets
        .map((dataset, series) => {
          const color = colors[series % colors.length];
          const path = dataset.series
            .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`)
            .join(' ');
          const points = dataset.series
            .map((value, index) => `<circle cx="${x(index)}" cy="${y(value)}" r="3" fill="${color}"><title>${dataset.label}: ${formatCompact(value)}</title></circle>`)
            .join('');
          return `<path class="chart-line" stroke="${color}" d="${path}" />${points}`;
        })
        .join('');

      chartEl.innerHTML = `${grid}${lines}${xLabels}`;
      legendEl.innerHTML = spec.datasets
        .map((dataset, series) => `<span style="--swatch: ${colors[series % colors.length]}">${dataset.label}</span>`)
        .join('');
    };

    const queriesColors = (scenario) => (scenario === 'actual' ? [COLORS[2], COLORS[0]] : [COLORS[0], COLORS[1]]);

    const setActiveScenario = (scenario) => {
      scenariosEl.dataset.active = scenario;
      scenariosEl.querySelectorAll('.scenario-btn').forEach((button) => {
        button.classList.toggle('active', button.dataset.scenario === scenario);
      });
    };

    const selectScenario = async (scenario) => {
      const res = await fetch('/api/scenario', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ scenario })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to switch scenario');
      }
      renderChart(await res.json(), queriesColors(scenario));
      setActiveScenario(scenario);
      setStatus('');
    };

    const loadScenarios = async () => {
      const res = await fetch('/api/scenarios');
      if (!res.ok) {
        throw new Error('Unable to load scenarios');
      }
      const data = await res.json();
      scenariosEl.innerHTML = data.scenarios
        .map((key) => `<button class="scenario-btn" type="button" data-scenario="${key}">${key.charAt(0).toUpperCase() + key.slice(1)}</button>`)
        .join('');
      scenariosEl.querySelectorAll('.scenario-btn').forEach((button) => {
        button.addEventListener('click', () => {
          selectScenario(button.dataset.scenario).catch((err) => setStatus(err.message));
        });
      });
      setActiveScenario(data.active);
    };

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const board = await res.json();
      renderChart(board.queries, queriesColors(board.active_scenario));
      renderChart(board.impressions, [COLORS[3], COLORS[1]]);
      renderChart(board.flights, [COLORS[2], COLORS[0]]);
      renderChart(board.hotels, [COLORS[2], COLORS[0]]);
    };

    document.querySelectorAll('.tab-btn').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.tab-btn').forEach((btn) => btn.classList.remove('active'));
        document.querySelectorAll('.tab-content').forEach((content) => content.classList.remove('active'));
        button.classList.add('active');
        document.getElementById(`${button.dataset.tab}-tab`).classList.add('active');
      });
    });

    document.querySelector('.print-btn').addEventListener('click', () => window.print());

    Promise.all([loadDashboard(), loadScenarios()]).catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
