pub const GLOBAL_CSS: &str = r#"
:root {
  --bg: #05090f;
  --bg-elev-1: #0b111a;
  --panel: #0d1520;
  --border: rgba(255, 255, 255, 0.08);
  --border-strong: rgba(255, 255, 255, 0.16);
  --text: #e6edf7;
  --text-dim: #b7c6d9;
  --text-muted: #7f8ba0;
  --accent: #5cb0ff;
  --accent-strong: #7ac6ff;
  --positive: #3fb68b;
  --negative: #f0635c;
  --warning: #f7c843;
  --surface-hover: rgba(255, 255, 255, 0.05);
  --surface-active: rgba(255, 255, 255, 0.1);
  --radius: 10px;
  --space-1: 4px;
  --space-2: 8px;
  --space-3: 12px;
  --space-4: 16px;
  --space-6: 24px;
  --font-body: "Inter", "SF Pro Text", system-ui, -apple-system, sans-serif;
  --font-mono: "JetBrains Mono", "SFMono-Regular", ui-monospace, monospace;
  --font-size-xs: 11px;
  --font-size-sm: 13px;
  --font-size-md: 15px;
  --font-size-lg: 17px;
  --transition: 140ms ease-out;
}

.light-theme {
  --bg: #f8fbff;
  --bg-elev-1: #ffffff;
  --panel: #ffffff;
  --border: rgba(0, 0, 0, 0.06);
  --border-strong: rgba(0, 0, 0, 0.12);
  --text: #0c1625;
  --text-dim: #2c3a4f;
  --text-muted: #5b6678;
  --accent: #2563eb;
  --accent-strong: #1d4ed8;
  --positive: #0ea66c;
  --negative: #e11d48;
  --warning: #d97706;
  --surface-hover: rgba(0, 0, 0, 0.04);
  --surface-active: rgba(0, 0, 0, 0.08);
}

* { box-sizing: border-box; }
html, body {
  padding: 0;
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: var(--font-size-sm);
  line-height: 1.4;
  min-height: 100%;
}

button {
  font-family: var(--font-body);
  background: var(--bg-elev-1);
  border: 1px solid var(--border);
  color: var(--text);
  border-radius: var(--radius);
  padding: var(--space-2) var(--space-3);
  cursor: pointer;
  transition: background var(--transition);
}
button:hover { background: var(--surface-hover); }
button:disabled { opacity: 0.45; cursor: not-allowed; }
button.primary { background: var(--accent); color: #04121f; border-color: transparent; }
button.primary:hover { background: var(--accent-strong); }

input, select {
  background: var(--bg-elev-1);
  border: 1px solid var(--border);
  color: var(--text);
  border-radius: var(--radius);
  padding: var(--space-2);
  font-family: var(--font-body);
}

.folio-app {
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

.topbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: var(--space-4);
  padding: var(--space-3) var(--space-4);
  border-bottom: 1px solid var(--border);
  background: var(--bg-elev-1);
}
.brand-title { font-size: var(--font-size-lg); font-weight: 600; }
.nav-tabs { display: flex; gap: var(--space-2); }
.nav-tab {
  border: none;
  background: transparent;
  color: var(--text-dim);
  padding: var(--space-2) var(--space-3);
  border-radius: var(--radius);
}
.nav-tab.active { background: var(--surface-active); color: var(--text); }

.page { padding: var(--space-4); display: flex; flex-direction: column; gap: var(--space-4); }

.panel {
  background: var(--panel);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: var(--space-4);
}
.panel-title { font-size: var(--font-size-md); font-weight: 600; margin-bottom: var(--space-3); }
.panel-row { display: flex; gap: var(--space-4); align-items: flex-start; flex-wrap: wrap; }
.panel-row > .panel { flex: 1 1 280px; }

.section-label {
  font-size: var(--font-size-xs);
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--text-muted);
  margin-bottom: var(--space-1);
}

.stat-grid { display: flex; flex-wrap: wrap; gap: var(--space-3); }
.stat-card {
  flex: 1 1 140px;
  background: var(--bg-elev-1);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: var(--space-3);
}
.stat-value { font-size: var(--font-size-lg); font-family: var(--font-mono); }
.stat-value.positive { color: var(--positive); }
.stat-value.negative { color: var(--negative); }

.data-table { width: 100%; border-collapse: collapse; }
.data-table th, .data-table td {
  text-align: left;
  padding: var(--space-2) var(--space-3);
  border-bottom: 1px solid var(--border);
}
.data-table th button {
  border: none;
  background: transparent;
  color: var(--text-dim);
  padding: 0;
  font-size: var(--font-size-xs);
  text-transform: uppercase;
  letter-spacing: 0.06em;
}
.data-table th button.active { color: var(--text); }
.data-table td.numeric { font-family: var(--font-mono); text-align: right; }
.row-list { display: flex; flex-direction: column; gap: var(--space-1); }
.row-item {
  display: flex;
  justify-content: space-between;
  border: 1px solid transparent;
  background: transparent;
  text-align: left;
}
.row-item.active { border-color: var(--accent); background: var(--surface-active); }

.tab-row { display: flex; gap: var(--space-2); border-bottom: 1px solid var(--border); margin-bottom: var(--space-3); }
.tab-btn { border: none; background: transparent; color: var(--text-muted); border-radius: 0; }
.tab-btn.active { color: var(--text); border-bottom: 2px solid var(--accent); }

.weight-grid { display: flex; flex-wrap: wrap; gap: var(--space-4); }
.weight-stack { flex: 1 1 180px; display: flex; flex-direction: column; gap: var(--space-1); }
.weight-actions { display: flex; align-items: center; gap: var(--space-3); margin-top: var(--space-3); }
.sum-bad { color: var(--negative); }

.pager { display: flex; align-items: center; gap: var(--space-3); margin-top: var(--space-3); }
.pager-label { color: var(--text-muted); font-size: var(--font-size-xs); }

.sector-bar {
  height: 8px;
  border-radius: 4px;
  background: var(--accent);
  margin-top: var(--space-1);
}

.notice {
  position: fixed;
  bottom: var(--space-4);
  left: var(--space-4);
  display: flex;
  align-items: center;
  gap: var(--space-3);
  padding: var(--space-3) var(--space-4);
  border-radius: var(--radius);
  border: 1px solid var(--border-strong);
  background: var(--bg-elev-1);
}
.notice-good { border-color: var(--positive); }
.notice-error { border-color: var(--negative); }
.error-text { color: var(--negative); }
.muted { color: var(--text-muted); }

.dialog-backdrop {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.55);
  display: flex;
  align-items: center;
  justify-content: center;
}
.dialog {
  width: min(480px, 92vw);
  display: flex;
  flex-direction: column;
  gap: var(--space-3);
}
.dialog-actions { display: flex; justify-content: flex-end; gap: var(--space-2); }
.field-stack { display: flex; flex-direction: column; gap: var(--space-1); }
"#;
