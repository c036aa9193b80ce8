use std::path::PathBuf;

use portal_core::{
    applications::{check_can_apply, find_application, my_applications, SortOrder, StatusFilter},
    models::{AreaId, JobId},
    navigation::Screen,
    resume,
    validation::{format_cpf, ValidationError},
};

use crate::{
    context::App,
    error::{Error, Result},
};

pub async fn apply(app: &mut App, job_id: JobId) -> Result<()> {
    app.enter(&Screen::MyApplications)?;
    app.load_jobs().await?;
    let student_id = app.current_user()?.id;
    let job = app.visible_job(job_id).await?;
    let applications = app.client.list_applications().await?;
    check_can_apply(&applications, student_id, job)?;
    app.client.apply(student_id, job_id).await?;
    println!("Applied to '{}'.", job.title);
    Ok(())
}

pub async fn cancel(app: &mut App, job_id: JobId) -> Result<()> {
    app.enter(&Screen::MyApplications)?;
    app.load_jobs().await?;
    let student_id = app.current_user()?.id;
    let applications = app.client.list_applications().await?;
    let application =
        find_application(&applications, student_id, job_id).ok_or(Error::NotFound {
            kind: "Application to job",
            id: job_id,
        })?;
    let job = app.job(job_id)?;
    if !job.is_open() {
        return Err(ValidationError::CancelClosed.into());
    }
    app.client.cancel_application(application.id).await?;
    println!("Application to '{}' cancelled.", job.title);
    Ok(())
}

pub async fn list(app: &mut App, filter: StatusFilter, order: SortOrder) -> Result<()> {
    app.enter(&Screen::MyApplications)?;
    app.load_jobs().await?;
    let student_id = app.current_user()?.id;
    let applications = app.client.list_applications().await?;
    let candidacies = my_applications(&applications, app.jobs(), student_id, filter, order);
    if candidacies.is_empty() {
        println!("No applications found.");
    }
    for candidacy in candidacies {
        println!(
            "#{:<5} {} - {} | applied {} | {} | job {}{}",
            candidacy.job.id,
            candidacy.job.title,
            candidacy.job.company_name().unwrap_or("-"),
            candidacy.application.applied_at.format("%Y-%m-%d"),
            candidacy.application.status,
            candidacy.job.status,
            if candidacy.can_cancel() { "" } else { " (cannot cancel)" }
        );
    }
    Ok(())
}

pub async fn profile(app: &App) -> Result<()> {
    app.enter(&Screen::Profile)?;
    let student = app.student_profile().await?;
    println!("{}", student.name);
    println!("CPF:   {}", format_cpf(&student.cpf));
    println!("Email: {}", student.email);
    let areas = student
        .interest_areas
        .iter()
        .map(|area| format!("{} (#{})", area.title, area.id))
        .collect::<Vec<_>>();
    println!("Interest areas: {}", areas.join(", "));
    Ok(())
}

pub async fn set_areas(app: &App, area_ids: Vec<AreaId>) -> Result<()> {
    app.enter(&Screen::Profile)?;
    let student = app.student_profile().await?;
    let areas = app.areas_by_id(&area_ids).await?;
    app.client.update_student_areas(&student, areas).await?;
    if area_ids.is_empty() {
        println!("Interest areas cleared, no jobs will be listed until you pick some.");
    } else {
        println!("Interest areas updated.");
    }
    Ok(())
}

pub async fn export_resume(app: &App, output: Option<PathBuf>) -> Result<()> {
    app.enter(&Screen::Profile)?;
    let student = app.student_profile().await?;
    let path = output.unwrap_or_else(|| PathBuf::from(resume::file_name(&student)));
    tokio::fs::write(&path, resume::render_html(&student)).await?;
    log::info!("Wrote résumé of student {}", student.id);
    println!("Résumé saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use portal_core::models::Role;

    use super::*;
    use crate::context::test::{open_app, Backend};

    #[tokio::test]
    async fn test_apply_outside_interest_areas_is_refused() {
        let jobs = r#"[{"id": 1, "titulo": "Estágio Dados", "cargaHoraria": "20 horas",
            "dataInicio": "2000-01-01", "dataFim": "2999-12-31", "status": "ABERTA",
            "listAreaInteresse": [{"id": 2, "titulo": "Dados"}],
            "empresa": {"id": 7, "nome": "Tech Co"}}]"#;
        let student = r#"{"id": 5, "nome": "Ana", "cpf": "12345678909", "email": "ana@mail.com",
            "listAreaInteresse": [{"id": 1, "titulo": "Backend"}]}"#;
        let backend = Backend::serve(&[
            ("GET /vagaEstagio", jobs),
            ("GET /estudante/5", student),
            ("GET /inscricao", "[]"),
            ("POST /inscricao", ""),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_app(&backend.base_url, dir.path(), Some(Role::Student)).await;
        match apply(&mut app, 1).await {
            Err(Error::NotFound { kind: "Job", id: 1 }) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(!backend.requests().contains(&"POST /inscricao".to_owned()));
    }
}
