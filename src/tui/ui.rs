use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BookTable, EditFormView, LandingPage, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::{Block, Paragraph};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [title_area, main_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.server_url.clone(),
        app.status_message.clone(),
        app.session_active,
    );
    title_bar.render(frame, title_area);

    match &app.route {
        Route::Home => LandingPage::checking_session().render(frame, main_area),
        Route::Login => LandingPage::login_required().render(frame, main_area),
        Route::BookList => {
            BookTable::new(&mut tui.book_table, &app.book_list).render(frame, main_area)
        }
        Route::Edit(_) => match &app.edit_form {
            Some(form) => EditFormView::new(form).render(frame, main_area),
            None => draw_error_view(frame, main_area, "Nothing to edit."),
        },
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}
