use tui_blocks::core::Session;
use tui_blocks::term::{AnchorY, GameView, Viewport};
use tui_blocks::types::{GameConfig, BACKGROUND, DEFAULT_PALETTE};

fn empty_snapshot() -> tui_blocks::core::GameSnapshot {
    let mut snap = Session::new(GameConfig::default(), 1).unwrap().snapshot();
    snap.grid.fill(BACKGROUND);
    snap.active = None;
    snap.active_cells.clear();
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Session::new(GameConfig::default(), 1).unwrap().snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = empty_snapshot();
    snap.grid[19 * 10] = 2;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, DEFAULT_PALETTE[2]);
    assert_ne!(fb.get(x0 + 2, y0).unwrap().ch, '█');
}

#[test]
fn term_view_uses_configured_cell_size_and_palette() {
    let mut config = GameConfig::default();
    config.cell_size = 1;
    config.palette[1] = tui_blocks::types::Rgb::new(1, 2, 3);

    let mut snap = empty_snapshot();
    snap.grid[0] = 1;

    let view = GameView::from_config(&config).with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(12, 22));
    assert_eq!(fb.get(11, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(1, 1).unwrap().style.fg, tui_blocks::types::Rgb::new(1, 2, 3));
}

#[test]
fn term_view_side_panel_shows_score_and_next() {
    let mut snap = empty_snapshot();
    snap.score = 120;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(60, 22));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
    assert!(text.contains("SCORE"));
    assert!(text.contains("120"));
    assert!(text.contains("NEXT"));
    // The board is empty, so every filled glyph belongs to the next-piece
    // preview: four cells, two columns each.
    assert_eq!(text.chars().filter(|&c| c == '█').count(), 8);
}

#[test]
fn term_view_shows_game_over_banner() {
    let mut snap = empty_snapshot();
    snap.terminal = true;

    let fb = GameView::default().render(&snap, Viewport::new(30, 24));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("n/q: quit"));
}
