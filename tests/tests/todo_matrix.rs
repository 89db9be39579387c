//! Todo service access control, run over the full identity matrix.

use idmatrix_tests::prelude::*;
use idmatrix_tests::ADMIN;

type Ctx<'a> = CellContext<'a, TodoFixture>;
type BodyResult = Result<(), TestFailure<AuthFailure>>;

fn configuration(name: &str, producers: &[&str], consumers: &[&str]) -> MatrixConfiguration {
    let declaration = Declaration::new()
        .producers(producers.iter().copied())
        .consumers(consumers.iter().copied());
    MatrixConfiguration::build(name, &declaration).unwrap()
}

fn create_list(ctx: &mut Ctx<'_>, visibility: Visibility) -> Result<u64, TestFailure<AuthFailure>> {
    let name = match visibility {
        Visibility::Public => "books",
        Visibility::Private => "groceries",
    };
    Ok(ctx.fixture_mut().service.create_todo_list(name, visibility)?)
}

fn producer_is_admin(ctx: &Ctx<'_>) -> bool {
    ctx.producer().value() == ADMIN
}

mod access_control {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn class() -> TestClass<TodoFixture> {
        let configuration = configuration(
            "TodoServiceIT",
            &["role:ADMIN", "role:USER"],
            &["PRODUCER", "role:ADMIN", "role:USER", "NEW_USER", "ANONYMOUS"],
        );

        TestClass::new(configuration, TodoFixture::setup)
            .method(TestMethod::new("get_private_list", get_private_list))
            .method(TestMethod::new("get_public_list", get_public_list))
            .method(
                TestMethod::new("add_item", add_item).run_with(RuleDeclaration::new(
                    Vec::<String>::new(),
                    vec!["PRODUCER".to_string(), "role:ADMIN".to_string()],
                )),
            )
            .method(
                TestMethod::new("delete_list", delete_list).ignore_for(RuleDeclaration::new(
                    Vec::<String>::new(),
                    vec!["ANONYMOUS".to_string()],
                )),
            )
    }

    fn get_private_list(ctx: &mut Ctx<'_>) -> BodyResult {
        let id = create_list(ctx, Visibility::Private)?;
        ctx.log_in_as(LoginRole::Consumer)?;

        // a fresh user with the producer's role is only an admin for admin producers
        let denied = if producer_is_admin(ctx) {
            any_of(["role:USER"])
        } else {
            any_of(["role:USER", "NEW_USER"])
        }?;
        let table = ctx
            .expectations()
            .to_fail(denied)
            .to_fail_with(AuthFailure::Authentication, any_of(["ANONYMOUS"])?);

        ctx.check(table, |f| f.service.get_todo_list(id).map(|list| list.name))
    }

    fn get_public_list(ctx: &mut Ctx<'_>) -> BodyResult {
        let id = create_list(ctx, Visibility::Public)?;
        ctx.log_in_as(LoginRole::Consumer)?;

        let table = ctx
            .expectations()
            .otherwise(Expectation::Value("books".to_string()));
        ctx.check(table, |f| f.service.get_todo_list(id).map(|list| list.name))
    }

    fn add_item(ctx: &mut Ctx<'_>) -> BodyResult {
        let id = create_list(ctx, Visibility::Private)?;
        ctx.log_in_as(LoginRole::Consumer)?;

        // role:USER only runs here when it is also the producer's role, and
        // then logs in as a different user
        let table = ctx
            .expectations()
            .to_fail(any_of(["role:USER"])?)
            .otherwise(Expectation::assert_value(|item: &u64| {
                if *item > 1 {
                    Ok(())
                } else {
                    Err(format!("item id {} collides with the list id", item))
                }
            }));
        ctx.check(table, |f| f.service.add_item(id, "milk"))
    }

    fn delete_list(ctx: &mut Ctx<'_>) -> BodyResult {
        let id = create_list(ctx, Visibility::Private)?;
        ctx.log_in_as(LoginRole::Consumer)?;

        let denied = if producer_is_admin(ctx) {
            any_of(["role:USER"])
        } else {
            any_of(["PRODUCER", "role:USER", "NEW_USER"])
        }?;
        let table = ctx.expectations().when_called_with(denied).then(
            Expectation::ToFailMatching(
                AuthFailure::AccessDenied,
                r"may not delete list \d+$".to_string(),
            ),
        );
        ctx.check(table, |f| f.service.delete_todo_list(id))
    }

    #[test]
    fn test_access_control_matrix() {
        let summary = MatrixRunner::default().run(&class()).unwrap();

        assert_eq!(summary.cells.len(), 10);
        assert_eq!(
            (summary.total, summary.passed, summary.failed, summary.ignored),
            (40, 33, 0, 7)
        );

        let add_item_cells: Vec<_> = summary
            .cells
            .iter()
            .filter(|c| c.status_of("add_item") == Some(&MethodStatus::Passed))
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(
            add_item_cells,
            vec![
                "producer={role:ADMIN}, consumer={PRODUCER}",
                "producer={role:ADMIN}, consumer={role:ADMIN}",
                "producer={role:USER}, consumer={PRODUCER}",
                "producer={role:USER}, consumer={role:ADMIN}",
                "producer={role:USER}, consumer={role:USER}",
            ]
        );

        let anonymous = summary
            .cell("producer={role:USER}, consumer={ANONYMOUS}")
            .unwrap();
        assert_eq!(anonymous.status_of("delete_list"), Some(&MethodStatus::Ignored));
    }

    #[test]
    fn test_access_control_matrix_in_parallel() {
        let sequential = MatrixRunner::default().run(&class()).unwrap();
        let parallel = MatrixRunner::new(RunnerConfig::new().with_workers(4).with_shuffle(true))
            .run(&class())
            .unwrap();

        let outline = |s: &RunSummary| {
            s.cells
                .iter()
                .map(|c| {
                    let statuses: Vec<_> = c.methods.iter().map(|m| m.status.clone()).collect();
                    (c.label.clone(), statuses)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(outline(&parallel), outline(&sequential));
    }
}

mod wrong_expectations {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Claims that regular users can read private lists of admins.
    fn optimistic_read(ctx: &mut Ctx<'_>) -> BodyResult {
        let id = create_list(ctx, Visibility::Private)?;
        ctx.log_in_as(LoginRole::Consumer)?;
        let table = ctx.expectations().not_to_fail(any_of(["role:USER", "role:ADMIN"])?);
        ctx.check(table, |f| f.service.get_todo_list(id).map(|_| ()))
    }

    #[test]
    fn test_only_the_wrong_combination_fails() {
        let configuration = configuration("OptimisticIT", &["role:ADMIN"], &["role:ADMIN", "role:USER"]);
        let class = TestClass::new(configuration, TodoFixture::setup)
            .method(TestMethod::new("optimistic_read", optimistic_read));

        let summary = MatrixRunner::default().run(&class).unwrap();

        assert_eq!((summary.passed, summary.failed), (1, 1));
        let (cell, method) = summary.failures().next().unwrap();
        assert_eq!(cell.label, "producer={role:ADMIN}, consumer={role:USER}");
        match &method.status {
            MethodStatus::Failed(message) => {
                assert!(message.starts_with("Not expected to fail for role:USER"), "{}", message);
                assert!(message.contains("AccessDenied"), "{}", message);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }
}

mod smoke {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn class() -> TestClass<TodoFixture> {
        let configuration = configuration("SmokeIT", &["role:ADMIN"], &["role:ADMIN"]);
        TestClass::new(configuration, TodoFixture::setup)
            .method(TestMethod::new("passes", |ctx: &mut Ctx<'_>| {
                let id = create_list(ctx, Visibility::Private)?;
                ctx.log_in_as(LoginRole::Consumer)?;
                let table = ctx.expectations().not_to_fail(any_of(["role:ADMIN"])?);
                ctx.check(table, |f| f.service.get_todo_list(id).map(|_| ()))
            }))
            .method(TestMethod::new("fails", |ctx: &mut Ctx<'_>| {
                let id = create_list(ctx, Visibility::Private)?;
                ctx.log_in_as(LoginRole::Consumer)?;
                let table = ctx.expectations().to_fail(any_of(["role:ADMIN"])?);
                ctx.check(table, |f| f.service.get_todo_list(id).map(|_| ()))
            }))
    }

    #[test]
    fn test_smoke() {
        let summary = MatrixRunner::default().run(&class()).unwrap();
        let cell = summary.cell("producer={role:ADMIN}, consumer={role:ADMIN}").unwrap();

        assert_eq!(cell.status_of("passes"), Some(&MethodStatus::Passed));
        assert_eq!(
            cell.status_of("fails"),
            Some(&MethodStatus::Failed(
                "Expected to fail with AccessDenied for role:ADMIN, but the call succeeded"
                    .to_string()
            ))
        );
        assert!(!summary.is_success());
    }
}
