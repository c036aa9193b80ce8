use crate::models::Student;
use crate::validation::format_cpf;

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn file_name(student: &Student) -> String {
    let name = student.name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("curriculo_{}.html", name)
}

/// Standalone HTML résumé of a student
pub fn render_html(student: &Student) -> String {
    let name = escape_html(&student.name);
    let areas = if student.interest_areas.is_empty() {
        "<li>Nenhuma área informada</li>".to_owned()
    } else {
        student
            .interest_areas
            .iter()
            .map(|area| format!("<li>{}</li>", escape_html(&area.title)))
            .collect::<Vec<_>>()
            .join("\n      ")
    };
    let objective = match student.interest_areas.len() {
        0 => "Busco uma oportunidade de estágio para aplicar e desenvolver meus conhecimentos.".to_owned(),
        _ => format!(
            "Busco uma oportunidade de estágio nas áreas de {}.",
            escape_html(
                &student
                    .interest_areas
                    .iter()
                    .map(|area| area.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        ),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <title>Currículo - {name}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 720px; margin: 2rem auto; color: #1f2937; }}
    h1 {{ color: #2563eb; margin-bottom: 0; }}
    h2 {{ border-bottom: 1px solid #d1d5db; padding-bottom: .25rem; }}
  </style>
</head>
<body>
  <h1>{name}</h1>
  <p>CPF: {cpf}<br>Email: {email}</p>
  <h2>Objetivo</h2>
  <p>{objective}</p>
  <h2>Áreas de Interesse</h2>
  <ul>
      {areas}
  </ul>
</body>
</html>
"#,
        name = name,
        cpf = escape_html(&format_cpf(&student.cpf)),
        email = escape_html(&student.email),
        objective = objective,
        areas = areas,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::InterestArea;

    fn student() -> Student {
        Student {
            id: 1,
            name: "Ana  Souza <Dev>".to_owned(),
            cpf: "12345678901".to_owned(),
            email: "ana@mail.com".to_owned(),
            interest_areas: vec![InterestArea {
                id: 1,
                title: "P&D".to_owned(),
                description: String::new(),
            }],
        }
    }

    #[test]
    fn test_file_name() {
        let student = Student {
            name: " Ana Maria  Souza".to_owned(),
            ..student()
        };
        assert_eq!(file_name(&student), "curriculo_Ana_Maria_Souza.html");
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render_html(&student());
        assert!(html.contains("<h1>Ana  Souza &lt;Dev&gt;</h1>"));
        assert!(html.contains("<li>P&amp;D</li>"));
        assert!(html.contains("CPF: 123.456.789-01"));
        assert!(html.contains("nas áreas de P&amp;D."));
        assert!(!html.contains("<Dev>"));
    }

    #[test]
    fn test_render_without_areas() {
        let html = render_html(&Student {
            interest_areas: vec![],
            ..student()
        });
        assert!(html.contains("Nenhuma área informada"));
    }
}
