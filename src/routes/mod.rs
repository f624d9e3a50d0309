mod admin;
mod complaints;
mod dashboard;
mod login;
mod not_found;
mod profile;
mod reference;

pub(crate) use admin::AdminUsersPage;
pub(crate) use complaints::{ComplaintDetailPage, ComplaintsListPage, NewComplaintPage};
pub(crate) use dashboard::DashboardPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::{NotFoundContent, NotFoundPage};
pub(crate) use profile::ProfilePage;
pub(crate) use reference::ReferenceDataPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=DashboardPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/complaints") view=ComplaintsListPage />
            <Route path=path!("/complaints/new") view=NewComplaintPage />
            <Route path=path!("/complaints/:id") view=ComplaintDetailPage />
            <Route path=path!("/admin") view=AdminUsersPage />
            <Route path=path!("/reference") view=ReferenceDataPage />
            <Route path=path!("/profile") view=ProfilePage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
