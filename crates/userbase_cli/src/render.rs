//! Tabular output rendering for the command loop.

use userbase_core::User;

const HEADERS: [&str; 5] = ["ID", "Email", "Name", "Surname", "Age"];

/// Renders all users as an aligned ASCII table, or a placeholder line when
/// the store is empty. Column widths follow the widest cell per column.
pub fn user_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows: Vec<[String; 5]> = users
        .iter()
        .map(|user| {
            [
                user.id.to_string(),
                user.email.clone(),
                user.name.clone(),
                user.surname.clone(),
                user.age.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");
    let format_row = |cells: &[String; 5]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header_cells = HEADERS.map(str::to_string);
    let mut lines = vec![separator.clone(), format_row(&header_cells), separator.clone()];
    for row in &rows {
        lines.push(format_row(row));
    }
    lines.push(separator);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::user_table;
    use userbase_core::User;

    #[test]
    fn empty_store_renders_placeholder() {
        assert_eq!(user_table(&[]), "No users found.");
    }

    #[test]
    fn single_row_table_is_aligned_to_widest_cell() {
        let users = vec![User {
            id: 1,
            email: "a@b.com".to_string(),
            name: "a".to_string(),
            surname: "b".to_string(),
            age: 20,
        }];

        let separator = ["--", "-------", "----", "-------", "---"].join("-+-");
        let header = ["ID", "Email  ", "Name", "Surname", "Age"].join(" | ");
        let row = ["1 ", "a@b.com", "a   ", "b      ", "20 "].join(" | ");
        let expected = format!("{separator}\n{header}\n{separator}\n{row}\n{separator}");

        assert_eq!(user_table(&users), expected);
    }

    #[test]
    fn columns_grow_with_longer_values() {
        let users = vec![
            User {
                id: 1,
                email: "a@b.com".to_string(),
                name: "a".to_string(),
                surname: "b".to_string(),
                age: 20,
            },
            User {
                id: 2,
                email: "someone.long@example.com".to_string(),
                name: "maria".to_string(),
                surname: "von trapp".to_string(),
                age: 100,
            },
        ];

        let rendered = user_table(&users);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("ID | Email"));
        assert!(lines[3].contains("a@b.com "));
        assert!(lines[4].contains("someone.long@example.com"));
        // All rows share one width.
        let width = lines[0].len();
        assert!(lines.iter().all(|line| line.len() == width));
    }
}
