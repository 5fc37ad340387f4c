mod detail;
mod form;
mod grid;
mod not_found;

pub(in crate::tui_shell) use detail::DetailView;
pub(in crate::tui_shell) use form::FormView;
pub(in crate::tui_shell) use grid::GridView;
pub(in crate::tui_shell) use not_found::NotFoundView;
