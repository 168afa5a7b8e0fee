use crate::core::market::DisplayState;
use std::sync::Arc;

/// Presentation side of the tracker. Implementations draw the grid, the
/// error panel and the loading indicator.
pub trait Presenter: Send + Sync {
    fn show_loading(&self, show: bool);
    fn render(&self, state: &DisplayState);
    fn render_error(&self, message: &str);
}

impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    fn show_loading(&self, show: bool) {
        (**self).show_loading(show)
    }

    fn render(&self, state: &DisplayState) {
        (**self).render(state)
    }

    fn render_error(&self, message: &str) {
        (**self).render_error(message)
    }
}

/// Shows the loading indicator for as long as the guard is alive.
pub struct LoadingGuard<'a, P: Presenter + ?Sized> {
    presenter: &'a P,
}

impl<'a, P: Presenter + ?Sized> LoadingGuard<'a, P> {
    pub fn show(presenter: &'a P) -> Self {
        presenter.show_loading(true);
        Self { presenter }
    }
}

impl<P: Presenter + ?Sized> Drop for LoadingGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.show_loading(false);
    }
}
