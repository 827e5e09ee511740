use ratatui_almanac_core::input::KeyCode;
use ratatui_almanac_core::input::KeyEvent;
use ratatui_almanac_core::keymap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarNav {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    MonthStart,
    MonthEnd,
    Today,
    Select,
}

#[derive(Clone, Debug)]
pub struct CalendarBindings {
    pub prev_day: Vec<KeyEvent>,
    pub next_day: Vec<KeyEvent>,
    pub prev_week: Vec<KeyEvent>,
    pub next_week: Vec<KeyEvent>,
    pub prev_month: Vec<KeyEvent>,
    pub next_month: Vec<KeyEvent>,
    pub month_start: Vec<KeyEvent>,
    pub month_end: Vec<KeyEvent>,
    pub today: Vec<KeyEvent>,
    pub select: Vec<KeyEvent>,
}

impl Default for CalendarBindings {
    fn default() -> Self {
        Self {
            prev_day: vec![KeyEvent::new(KeyCode::Left), keymap::key_char('h')],
            next_day: vec![KeyEvent::new(KeyCode::Right), keymap::key_char('l')],
            prev_week: vec![KeyEvent::new(KeyCode::Up), keymap::key_char('k')],
            next_week: vec![KeyEvent::new(KeyCode::Down), keymap::key_char('j')],
            prev_month: vec![KeyEvent::new(KeyCode::PageUp), keymap::key_char('[')],
            next_month: vec![KeyEvent::new(KeyCode::PageDown), keymap::key_char(']')],
            month_start: vec![KeyEvent::new(KeyCode::Home), keymap::key_char('g')],
            month_end: vec![KeyEvent::new(KeyCode::End), keymap::key_char('G')],
            today: vec![keymap::key_char('t')],
            select: vec![KeyEvent::new(KeyCode::Enter)],
        }
    }
}

impl CalendarBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<CalendarNav> {
        if keymap::matches_any(&self.prev_day, key) {
            return Some(CalendarNav::PrevDay);
        }
        if keymap::matches_any(&self.next_day, key) {
            return Some(CalendarNav::NextDay);
        }
        if keymap::matches_any(&self.prev_week, key) {
            return Some(CalendarNav::PrevWeek);
        }
        if keymap::matches_any(&self.next_week, key) {
            return Some(CalendarNav::NextWeek);
        }
        if keymap::matches_any(&self.prev_month, key) {
            return Some(CalendarNav::PrevMonth);
        }
        if keymap::matches_any(&self.next_month, key) {
            return Some(CalendarNav::NextMonth);
        }
        if keymap::matches_any(&self.month_start, key) {
            return Some(CalendarNav::MonthStart);
        }
        if keymap::matches_any(&self.month_end, key) {
            return Some(CalendarNav::MonthEnd);
        }
        if keymap::matches_any(&self.today, key) {
            return Some(CalendarNav::Today);
        }
        if keymap::matches_any(&self.select, key) {
            return Some(CalendarNav::Select);
        }
        None
    }
}
