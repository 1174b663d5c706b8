pub fn render_login(error: Option<&str>) -> String {
    let message = match error {
        Some(error) => format!(r#"<p class="status" data-type="error">{}</p>"#, escape_html(error)),
        None => r#"<p class="status">Please enter the password to access the dashboard.</p>"#.to_string(),
    };
    LOGIN_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{MESSAGE}}", &message)
}

pub fn render_dashboard() -> String {
    DASHBOARD_HTML.replace("{{STYLE}}", BASE_STYLE)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const BASE_STYLE: &str = r#"
    :root {
      --bg-1: #eef3f1;
      --bg-2: #b9d8d3;
      --ink: #23302e;
      --teal: rgba(0, 128, 128, 0.6);
      --navy: #1d2b64;
      --label: #8b1a1a;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(29, 43, 100, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6fbfa 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", Arial, sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1180px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: Georgia, serif;
      font-size: clamp(1.8rem, 3.5vw, 2.5rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5c6966;
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #6b7774;
    }

    select, input[type="date"], input[type="password"] {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(29, 43, 100, 0.2);
      background: white;
    }

    .years {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      text-transform: none;
      letter-spacing: 0;
    }

    .years label {
      display: inline-flex;
      gap: 6px;
      align-items: center;
      text-transform: none;
      letter-spacing: 0;
      color: var(--ink);
    }

    button, .download {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--navy);
      color: white;
      text-decoration: none;
      display: inline-block;
    }

    .tab {
      background: transparent;
      color: #5c6966;
    }

    .tab.active {
      background: white;
      color: var(--navy);
      box-shadow: 0 8px 16px rgba(29, 43, 100, 0.12);
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(29, 43, 100, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .chart-card, .table-card, .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(29, 43, 100, 0.08);
    }

    #chart {
      width: 100%;
      height: 520px;
      display: block;
    }

    .daily-line {
      fill: none;
      stroke: var(--teal);
      stroke-width: 2;
    }

    .daily-point {
      fill: var(--teal);
    }

    .monthly-line {
      stroke: var(--navy);
      stroke-width: 2;
    }

    .monthly-label {
      fill: var(--label);
      font-weight: bold;
      font-size: 12px;
      font-family: Arial, sans-serif;
    }

    .axis-label {
      fill: #6b7774;
      font-size: 11px;
    }

    .grid-line {
      stroke: rgba(29, 43, 100, 0.1);
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b9592;
      display: block;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--navy);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 6px 10px;
      border-bottom: 1px solid rgba(29, 43, 100, 0.08);
    }

    .table-scroll {
      max-height: 360px;
      overflow-y: auto;
    }

    .status {
      min-height: 1.2em;
      color: #5c6966;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="warning"] {
      color: #a66a00;
    }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Body Weight Trends</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app" style="width: min(420px, 100%);">
    <h1>Body Weight Trends</h1>
    <form method="post" action="/login" class="controls">
      <label>Enter password
        <input type="password" name="password" autofocus required />
      </label>
      <button type="submit">Unlock</button>
    </form>
    {{MESSAGE}}
  </main>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Body Weight Trends</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header style="display: flex; justify-content: space-between; align-items: start; gap: 16px;">
      <div>
        <h1>Body Weight Trends Over Time</h1>
        <p class="subtitle" id="dataset-info"></p>
        <p class="subtitle" id="loaded-info"></p>
      </div>
      <form method="post" action="/logout">
        <button type="submit">Logout</button>
      </form>
    </header>

    <section class="controls">
      <label>Mode
        <select id="mode">
          <option value="individual">Individual</option>
          <option value="position">Position</option>
        </select>
      </label>
      <label id="value-label">Select individual
        <select id="value"></select>
      </label>
      <label>Start date
        <input type="date" id="start" />
      </label>
      <label>End date
        <input type="date" id="end" />
      </label>
    </section>
    <section>
      <label>Filter by year</label>
      <div class="years" id="years"></div>
    </section>

    <div class="status" id="status"></div>

    <section class="chart-card">
      <svg id="chart" viewBox="0 0 1100 520" role="img" aria-label="Body weight chart"></svg>
    </section>

    <section class="table-card">
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-tab="daily">Daily Data</button>
        <button class="tab" type="button" data-tab="monthly">Monthly Averages</button>
        <button class="tab" type="button" data-tab="raw">Raw Data</button>
      </div>
      <div class="table-scroll"><table id="table"></table></div>
      <p><a class="download" id="download" href="#">Download CSV</a></p>
    </section>

    <section>
      <p class="subtitle" id="range-caption"></p>
      <div class="metrics">
        <div class="stat"><span class="label">Total records</span><span class="value" id="m-count">--</span></div>
        <div class="stat"><span class="label">Average weight</span><span class="value" id="m-mean">--</span></div>
        <div class="stat"><span class="label">Minimum weight</span><span class="value" id="m-min">--</span></div>
        <div class="stat"><span class="label">Maximum weight</span><span class="value" id="m-max">--</span></div>
      </div>
    </section>
  </main>

  <script>
    const el = (id) => document.getElementById(id);
    const modeEl = el('mode');
    const valueEl = el('value');
    const valueLabelEl = el('value-label');
    const startEl = el('start');
    const endEl = el('end');
    const yearsEl = el('years');
    const statusEl = el('status');
    const chartEl = el('chart');
    const tableEl = el('table');
    const downloadEl = el('download');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const SVG_NS = 'http://www.w3.org/2000/svg';

    let options = null;
    let view = null;
    let activeTab = 'daily';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const fmt = (value) => value.toFixed(1);

    const svg = (name, attrs, text) => {
      const node = document.createElementNS(SVG_NS, name);
      Object.entries(attrs).forEach(([key, value]) => node.setAttribute(key, value));
      if (text !== undefined) {
        node.textContent = text;
      }
      chartEl.appendChild(node);
      return node;
    };

    const fillValues = () => {
      const individual = modeEl.value === 'individual';
      const items = individual ? options.names : options.positions;
      valueLabelEl.firstChild.textContent = individual ? 'Select individual' : 'Select position';
      valueEl.innerHTML = '';
      const all = document.createElement('option');
      all.value = 'all';
      all.textContent = individual ? 'All Individuals' : 'All Positions';
      valueEl.appendChild(all);
      items.forEach((item) => {
        const option = document.createElement('option');
        option.value = item;
        option.textContent = item;
        valueEl.appendChild(option);
      });
    };

    const fillYears = () => {
      yearsEl.innerHTML = '';
      options.years.forEach((year) => {
        const label = document.createElement('label');
        const box = document.createElement('input');
        box.type = 'checkbox';
        box.value = year;
        box.checked = true;
        box.addEventListener('change', refresh);
        label.appendChild(box);
        label.appendChild(document.createTextNode(year));
        yearsEl.appendChild(label);
      });
    };

    const queryString = () => {
      const params = new URLSearchParams();
      params.set('mode', modeEl.value);
      params.set('value', valueEl.value);
      const years = Array.from(yearsEl.querySelectorAll('input:checked')).map((box) => box.value);
      params.set('years', years.join(','));
      params.set('start', startEl.value);
      params.set('end', endEl.value);
      return params.toString();
    };

    const renderChart = () => {
      chartEl.innerHTML = '';
      const width = 1100;
      const height = 520;
      const left = 60;
      const right = 30;
      const top = 50;
      const bottom = 70;

      const points = view.segments.flatMap((segment) => segment.points);
      const xs = points.map((p) => Date.parse(p.x));
      const ys = points.map((p) => p.y);
      let minX = Math.min(...xs);
      let maxX = Math.max(...xs);
      let minY = Math.min(...ys);
      let maxY = Math.max(...ys);
      if (minX === maxX) { minX -= 86400000; maxX += 86400000; }
      if (minY === maxY) { minY -= 1; maxY += 1; }
      const padY = (maxY - minY) * 0.1;
      minY -= padY;
      maxY += padY;

      const x = (date) => left + ((Date.parse(date) - minX) / (maxX - minX)) * (width - left - right);
      const y = (value) => height - bottom - ((value - minY) / (maxY - minY)) * (height - top - bottom);

      svg('text', { x: width / 2, y: 28, 'text-anchor': 'middle', 'font-size': 18 }, view.title);

      for (let i = 0; i <= 5; i += 1) {
        const value = minY + ((maxY - minY) * i) / 5;
        svg('line', { class: 'grid-line', x1: left, x2: width - right, y1: y(value), y2: y(value) });
        svg('text', { class: 'axis-label', x: left - 8, y: y(value) + 4, 'text-anchor': 'end' }, fmt(value));
      }

      view.ticks.forEach((tick) => {
        const px = x(tick.position);
        svg('text', {
          class: 'axis-label',
          x: px,
          y: height - bottom + 18,
          'text-anchor': 'end',
          transform: `rotate(-45 ${px} ${height - bottom + 18})`
        }, tick.label);
      });

      view.segments.forEach((segment) => {
        if (!segment.points.length) {
          return;
        }
        if (segment.trace_type === 'daily') {
          const d = segment.points.map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(p.x).toFixed(2)} ${y(p.y).toFixed(2)}`).join(' ');
          svg('path', { class: 'daily-line', d });
          segment.points.forEach((p) => svg('circle', { class: 'daily-point', cx: x(p.x), cy: y(p.y), r: 3 }));
        } else {
          const [a, b] = segment.points;
          svg('line', { class: 'monthly-line', x1: x(a.x), y1: y(a.y), x2: x(b.x), y2: y(b.y) });
          if (b.label) {
            svg('text', { class: 'monthly-label', x: x(b.x), y: y(b.y) - 8, 'text-anchor': 'middle' }, b.label);
          }
        }
      });
    };

    const renderTable = () => {
      tableEl.innerHTML = '';
      let headers;
      let rows;
      if (activeTab === 'monthly') {
        headers = ['Month', 'Average Weight (lbs)'];
        rows = view.monthly.slice().reverse().map((m) => [
          new Date(m.month_start + 'T00:00:00').toLocaleDateString('en-US', { month: 'long', year: 'numeric' }),
          fmt(m.mean_weight)
        ]);
        downloadEl.textContent = 'Download Monthly Data as CSV';
      } else if (activeTab === 'raw') {
        headers = ['Date', 'Name', 'Position', 'Weight (lbs)'];
        rows = view.records.slice().sort((a, b) => b.date.localeCompare(a.date)).map((r) => [r.date, r.name, r.position, fmt(r.weight)]);
        downloadEl.textContent = 'Download Raw Data as CSV';
      } else {
        headers = ['Date', 'Average Weight (lbs)'];
        rows = view.daily.slice().reverse().map((d) => [d.date, fmt(d.mean_weight)]);
        downloadEl.textContent = 'Download Daily Data as CSV';
      }
      const head = tableEl.createTHead().insertRow();
      headers.forEach((text) => {
        const th = document.createElement('th');
        th.textContent = text;
        head.appendChild(th);
      });
      const body = tableEl.createTBody();
      rows.forEach((cells) => {
        const row = body.insertRow();
        cells.forEach((text) => { row.insertCell().textContent = text; });
      });
      downloadEl.href = `/export/${activeTab}?${queryString()}`;
      downloadEl.setAttribute('download', view.exports[activeTab]);
    };

    const renderSummary = () => {
      el('m-count').textContent = view.summary.count;
      el('m-mean').textContent = `${fmt(view.summary.mean)} lbs`;
      el('m-min').textContent = `${fmt(view.summary.min)} lbs`;
      el('m-max').textContent = `${fmt(view.summary.max)} lbs`;
      el('range-caption').textContent = view.range_caption;
    };

    const clearView = () => {
      view = null;
      chartEl.innerHTML = '';
      tableEl.innerHTML = '';
      downloadEl.removeAttribute('href');
      ['m-count', 'm-mean', 'm-min', 'm-max'].forEach((id) => { el(id).textContent = '--'; });
    };

    async function refresh() {
      const res = await fetch(`/api/view?${queryString()}`);
      if (res.status === 401) {
        window.location.reload();
        return;
      }
      if (!res.ok) {
        clearView();
        const message = await res.text();
        setStatus(message, res.status === 404 ? 'warning' : 'error');
        return;
      }
      view = await res.json();
      setStatus('', '');
      renderChart();
      renderTable();
      renderSummary();
    }

    const loadOptions = async () => {
      const res = await fetch('/api/options');
      if (!res.ok) {
        throw new Error(await res.text());
      }
      options = await res.json();
      el('dataset-info').textContent = options.dataset_caption;
      el('loaded-info').textContent = options.loaded_caption;
      startEl.min = endEl.min = options.min_date;
      startEl.max = endEl.max = options.max_date;
      startEl.value = options.min_date;
      endEl.value = options.max_date;
      fillValues();
      fillYears();
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activeTab = button.dataset.tab;
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        if (view) {
          renderTable();
        }
      });
    });

    modeEl.addEventListener('change', () => { fillValues(); refresh(); });
    [valueEl, startEl, endEl].forEach((input) => input.addEventListener('change', refresh));

    loadOptions()
      .then(refresh)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_escapes_error_message() {
        let page = render_login(Some("<bad>"));
        assert!(page.contains("&lt;bad&gt;"));
        assert!(page.contains(r#"action="/login""#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn dashboard_page_is_fully_templated() {
        let page = render_dashboard();
        assert!(page.contains("/api/view"));
        assert!(page.contains(r#"id="download""#));
        assert!(page.contains(r#"id="loaded-info""#));
        assert!(page.trim_end().ends_with("</html>"));
        assert!(!page.contains("{{STYLE}}"));
    }
}
