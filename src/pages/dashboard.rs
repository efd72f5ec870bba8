use actix_web::{Responder, web};
use tracing::error;

use crate::auth::{CurrentUser, Session};
use crate::backend::HrBackend;
use crate::model::{Document, Employee, Reminder, Task};
use crate::shell::{History, Page, layout};
use crate::utils::html::escape;

/// How many rows the dashboard lists.
const LIST_LIMIT: usize = 5;

/// Everything the dashboard reads, fetched together.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub tasks: Vec<Task>,
    pub documents: Vec<Document>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Stats {
    Management {
        total_employees: usize,
        active_tasks: usize,
        total_documents: usize,
        /// Most recently added first.
        recent_employees: Vec<Employee>,
    },
    Personal {
        pending_tasks: usize,
        documents: usize,
        reminders: usize,
        /// Own open tasks in list order.
        urgent_tasks: Vec<Task>,
    },
}

impl Stats {
    pub fn summarize(session: &Session, snapshot: &Snapshot) -> Self {
        if session.is_management() {
            return Stats::Management {
                total_employees: snapshot.employees.len(),
                active_tasks: snapshot.tasks.iter().filter(|t| t.status.is_open()).count(),
                total_documents: snapshot.documents.len(),
                recent_employees: snapshot
                    .employees
                    .iter()
                    .rev()
                    .take(LIST_LIMIT)
                    .cloned()
                    .collect(),
            };
        }

        let me = session.id();
        let pending: Vec<&Task> = snapshot
            .tasks
            .iter()
            .filter(|t| t.is_assigned_to(me) && t.status.is_open())
            .collect();

        Stats::Personal {
            pending_tasks: pending.len(),
            documents: snapshot
                .documents
                .iter()
                .filter(|d| d.employee_id == me)
                .count(),
            reminders: snapshot
                .reminders
                .iter()
                .filter(|r| r.employee_id.as_deref() == Some(me))
                .count(),
            urgent_tasks: pending.into_iter().take(LIST_LIMIT).cloned().collect(),
        }
    }

    /// All counters zero, used when any read fails.
    pub fn empty(session: &Session) -> Self {
        Self::summarize(session, &Snapshot::default())
    }
}

/// Issues the four reads in parallel. Any failure fails the whole snapshot.
pub async fn load_snapshot(backend: &dyn HrBackend) -> Option<Snapshot> {
    let joined = futures::try_join!(
        backend.list_employees(),
        backend.list_tasks(),
        backend.list_documents(),
        backend.list_reminders(),
    );

    match joined {
        Ok((employees, tasks, documents, reminders)) => Some(Snapshot {
            employees,
            tasks,
            documents,
            reminders,
        }),
        Err(e) => {
            error!(error = %e, "Dashboard fetch error");
            None
        }
    }
}

fn card(title: &str, value: usize) -> String {
    format!(
        "<div class=\"card\"><h3>{title}</h3><div class=\"value\">{value}</div></div>"
    )
}

fn render(session: &Session, stats: &Stats) -> String {
    let mut out = String::new();

    let subtitle = if session.is_management() {
        format!(
            "Overview for {} Department",
            escape(&session.identity.department)
        )
    } else {
        format!("Welcome back, {}", escape(session.name()))
    };
    out.push_str(&format!(
        "<div class=\"page-header\"><h1>Dashboard</h1><p class=\"text-secondary\">{subtitle}</p></div>"
    ));

    match stats {
        Stats::Management {
            total_employees,
            active_tasks,
            total_documents,
            recent_employees,
        } => {
            out.push_str("<div class=\"stats-grid\">");
            out.push_str(&card("Total Active Tasks", *active_tasks));
            out.push_str(&card("Total Documents", *total_documents));
            out.push_str(&card("Total Employees", *total_employees));
            out.push_str("</div>");

            let rows: String = recent_employees
                .iter()
                .map(|e| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape(&e.name),
                        escape(&e.position),
                        escape(&e.department)
                    )
                })
                .collect();
            out.push_str(&format!(
                "<div class=\"card\"><h3>Recently Joined Employees</h3>\
                 <table><thead><tr><th>NAME</th><th>POSITION</th><th>DEPARTMENT</th></tr></thead>\
                 <tbody>{rows}</tbody></table></div>"
            ));
        }
        Stats::Personal {
            pending_tasks,
            documents,
            reminders,
            urgent_tasks,
        } => {
            out.push_str("<div class=\"stats-grid\">");
            out.push_str(&card("My Pending Tasks", *pending_tasks));
            out.push_str(&card("My Documents", *documents));
            out.push_str(&card("My Reminders", *reminders));
            out.push_str("</div>");

            out.push_str("<div class=\"card\"><h3>My Priority Actions</h3>");
            if urgent_tasks.is_empty() {
                out.push_str("<p>You have no pending tasks. Great job!</p>");
            } else {
                let rows: String = urgent_tasks
                    .iter()
                    .map(|t| {
                        format!(
                            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                            escape(&t.title),
                            escape(t.due_date.as_deref().unwrap_or("No Date")),
                            t.status
                        )
                    })
                    .collect();
                out.push_str(&format!(
                    "<table><thead><tr><th>TASK TITLE</th><th>DUE DATE</th><th>STATUS</th></tr></thead>\
                     <tbody>{rows}</tbody></table>"
                ));
            }
            out.push_str("</div>");
        }
    }

    out
}

pub async fn dashboard(
    user: CurrentUser,
    backend: web::Data<dyn HrBackend>,
    history: web::Data<History>,
) -> impl Responder {
    history.enter(Page::Dashboard);

    let stats = match load_snapshot(backend.get_ref()).await {
        Some(snapshot) => Stats::summarize(&user, &snapshot),
        None => Stats::empty(&user),
    };

    layout::page(
        &user,
        Page::Dashboard,
        "Dashboard",
        history.take_alert(),
        &render(&user, &stats),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::model::TaskStatus;

    fn session(id: &str, position: &str) -> Session {
        Session::start(Employee {
            id: id.into(),
            name: "Jane".into(),
            position: position.into(),
            department: "Product".into(),
            ..Employee::default()
        })
    }

    fn employee(n: usize) -> Employee {
        Employee {
            id: format!("e{n}"),
            name: format!("Person {n}"),
            ..Employee::default()
        }
    }

    fn task(id: &str, owner: &str, status: TaskStatus) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            employee_id: owner.into(),
            status,
            ..Task::default()
        }
    }

    #[test]
    fn management_sees_five_most_recent_employees_newest_first() {
        let snapshot = Snapshot {
            employees: (1..=7).map(employee).collect(),
            ..Snapshot::default()
        };
        let Stats::Management {
            total_employees,
            recent_employees,
            ..
        } = Stats::summarize(&session("m1", "Project Manager"), &snapshot)
        else {
            panic!("expected management stats");
        };
        assert_eq!(total_employees, 7);
        let ids: Vec<_> = recent_employees.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e7", "e6", "e5", "e4", "e3"]);
    }

    #[test]
    fn management_counts_only_open_tasks() {
        let snapshot = Snapshot {
            tasks: vec![
                task("a", "e1", TaskStatus::Pending),
                task("b", "e2", TaskStatus::InProgress),
                task("c", "e2", TaskStatus::Completed),
            ],
            ..Snapshot::default()
        };
        let stats = Stats::summarize(&session("a1", "Admin"), &snapshot);
        assert!(matches!(stats, Stats::Management { active_tasks: 2, .. }));
    }

    #[test]
    fn employee_stats_are_scoped_to_self() {
        let mut tasks: Vec<Task> = (0..7)
            .map(|i| task(&format!("mine{i}"), "e1", TaskStatus::Pending))
            .collect();
        tasks.insert(0, task("done", "e1", TaskStatus::Completed));
        tasks.push(task("theirs", "e2", TaskStatus::Pending));

        let snapshot = Snapshot {
            tasks,
            documents: vec![
                Document {
                    id: "d1".into(),
                    employee_id: "e1".into(),
                    ..Document::default()
                },
                Document {
                    id: "d2".into(),
                    employee_id: "e2".into(),
                    ..Document::default()
                },
            ],
            reminders: vec![Reminder {
                id: "r1".into(),
                employee_id: Some("e1".into()),
                ..Reminder::default()
            }],
            ..Snapshot::default()
        };

        let Stats::Personal {
            pending_tasks,
            documents,
            reminders,
            urgent_tasks,
        } = Stats::summarize(&session("e1", "Software Developer"), &snapshot)
        else {
            panic!("expected personal stats");
        };
        assert_eq!(pending_tasks, 7);
        assert_eq!(documents, 1);
        assert_eq!(reminders, 1);
        let ids: Vec<_> = urgent_tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["mine0", "mine1", "mine2", "mine3", "mine4"]);
    }

    #[actix_web::test]
    async fn one_failed_read_discards_the_snapshot() {
        let backend = MemoryBackend::new().with_employees(vec![employee(1)]);
        assert!(load_snapshot(&backend).await.is_some());
        backend.set_offline(true);
        assert!(load_snapshot(&backend).await.is_none());
    }

    #[test]
    fn empty_stats_are_zero() {
        assert_eq!(
            Stats::empty(&session("e1", "Developer")),
            Stats::Personal {
                pending_tasks: 0,
                documents: 0,
                reminders: 0,
                urgent_tasks: Vec::new(),
            }
        );
    }
}
