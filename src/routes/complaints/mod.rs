//! Complaint case routes: the filtered list, the case detail, and intake.

mod detail;
mod list;
mod new;

pub(crate) use detail::ComplaintDetailPage;
pub(crate) use list::ComplaintsListPage;
pub(crate) use new::NewComplaintPage;
