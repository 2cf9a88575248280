//! Deck client script.
//!
//! - Posts panel actions to `/api/positions/:id/...`
//! - Listens on `/ws/monitor` and swaps in `/fragments/deck` after each commit,
//!   re-fetching when events arrive mid-fetch or while a slider is held
//! - Reconnects with a fixed back-off when the socket drops

pub const SCRIPT: &str = r#"
// ============================================================================
// Configuration
// ============================================================================
const CONFIG = {
    reconnectDelay: 3000,
    sliderDebounce: 150
};

// ============================================================================
// Actions
// ============================================================================
async function post(path, body) {
    try {
        const res = await fetch(path, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: body === undefined ? undefined : JSON.stringify(body)
        });
        if (!res.ok) {
            const err = await res.json().catch(() => ({}));
            console.warn('Action rejected:', path, err.error);
        }
    } catch (e) {
        console.error('Action failed:', path, e);
    }
}

const sliderTimers = {};

function onSlider(input) {
    const key = input.dataset.id + ':' + input.dataset.kind;
    clearTimeout(sliderTimers[key]);
    sliderTimers[key] = setTimeout(() => {
        post(`/api/positions/${input.dataset.id}/${input.dataset.kind}`,
             { percent: parseFloat(input.value) });
    }, CONFIG.sliderDebounce);
}

document.addEventListener('click', (event) => {
    const btn = event.target.closest('[data-action]');
    if (!btn) return;
    const id = btn.dataset.id;
    switch (btn.dataset.action) {
        case 'stop':   post(`/api/positions/${id}/stop/${btn.dataset.nudge}`); break;
        case 'target': post(`/api/positions/${id}/target/${btn.dataset.nudge}`); break;
        case 'close':  post(`/api/positions/${id}/close`, { ratio: parseFloat(btn.dataset.ratio) }); break;
        case 'flip':   post(`/api/positions/${id}/flip`); break;
    }
});

document.addEventListener('input', (event) => {
    if (event.target.matches('input[type=range][data-kind]')) onSlider(event.target);
});

// ============================================================================
// Live refresh
// ============================================================================
let refreshing = false;
let pending = false;
let dragging = false;

// Hold swaps only while a slider is physically held; focus outlives the drag.
document.addEventListener('pointerdown', (event) => {
    if (event.target.matches('input[type=range]')) dragging = true;
});

function releaseSlider() {
    if (!dragging) return;
    dragging = false;
    if (pending) refreshDeck();
}
document.addEventListener('pointerup', releaseSlider);
document.addEventListener('pointercancel', releaseSlider);

async function refreshDeck() {
    if (refreshing || dragging) {
        pending = true;
        return;
    }
    refreshing = true;
    pending = false;
    try {
        const res = await fetch('/fragments/deck');
        const html = await res.text();
        if (dragging) {
            pending = true;
        } else {
            document.getElementById('deck').innerHTML = html;
        }
    } catch (e) {
        console.error('Refresh failed:', e);
    } finally {
        refreshing = false;
        // An event landed mid-fetch; the fragment may predate it.
        if (pending && !dragging) refreshDeck();
    }
}

function connect() {
    const proto = location.protocol === 'https:' ? 'wss' : 'ws';
    const ws = new WebSocket(`${proto}://${location.host}/ws/monitor`);
    ws.onmessage = () => refreshDeck();
    ws.onclose = () => setTimeout(connect, CONFIG.reconnectDelay);
}

connect();
"#;
