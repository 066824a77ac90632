//! Renders the fixed C runtime preamble: the visited-set helper, one
//! allocation wrapper and one alias-visitor per named type, the root-set
//! table, and `invalidate_aliases_of`.
//!
//! This crate owns no Rust logic beyond string assembly — the thing it
//! produces is text for a C compiler, not code this binary links against.

/// A struct field whose type is a tagged pointer to another named type.
#[derive(Clone, Debug)]
pub struct PtrField {
    pub name: String,
    pub points_to: String,
}

/// One named struct type, with just enough shape for the alias visitor:
/// the subset of its fields that are themselves pointers.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: String,
    pub ptr_fields: Vec<PtrField>,
}

/// A global pointer variable — an entry in the alias invalidator's root set.
#[derive(Clone, Debug)]
pub struct RootVar {
    pub name: String,
    pub points_to: String,
}

/// Render the complete runtime preamble for a program declaring `types`
/// and holding the global pointer variables `roots`.
pub fn render(types: &[NamedType], roots: &[RootVar]) -> String {
    let mut out = String::new();
    out.push_str(VISITED_SET);
    out.push('\n');
    for ty in types {
        out.push_str(&render_allocator(ty));
        out.push('\n');
    }
    for ty in types {
        out.push_str(&render_visitor(ty));
        out.push('\n');
    }
    out.push_str(&render_invalidate(roots));
    out.push('\n');
    out.push_str(&render_free_helper());
    out
}

const VISITED_SET: &str = "\
typedef struct {
    void **slots;
    size_t len;
    size_t cap;
} eb_visited;

static void eb_visited_init(eb_visited *v) {
    v->slots = NULL;
    v->len = 0;
    v->cap = 0;
}

static int eb_visited_contains(eb_visited *v, void *slot) {
    for (size_t i = 0; i < v->len; i++) {
        if (v->slots[i] == slot) return 1;
    }
    return 0;
}

static void eb_visited_add(eb_visited *v, void *slot) {
    if (v->len == v->cap) {
        size_t new_cap = v->cap == 0 ? 8 : v->cap * 2;
        v->slots = realloc(v->slots, new_cap * sizeof(void *));
        v->cap = new_cap;
    }
    v->slots[v->len++] = slot;
}

static void eb_visited_free(eb_visited *v) {
    free(v->slots);
}
";

fn render_allocator(ty: &NamedType) -> String {
    format!(
        "\
static struct ptr_to_{name} make_ptr_to_{name}(void) {{
    struct ptr_to_{name} p;
    p.raw = malloc(sizeof(struct {name}));
    p.valid = p.raw != NULL;
    return p;
}}
",
        name = ty.name,
    )
}

fn render_visitor(ty: &NamedType) -> String {
    let mut body = String::new();
    for field in &ty.ptr_fields {
        body.push_str(&format!(
            "\
    if (p->{field}.valid) {{
        void *slot_{field} = (void *)&p->{field};
        if (!eb_visited_contains(visited, slot_{field})) {{
            eb_visited_add(visited, slot_{field});
            if ((void *)p->{field}.raw == target) {{
                p->{field}.valid = 0;
            }} else {{
                eb_visit_struct_{points_to}(p->{field}.raw, target, visited);
            }}
        }}
    }}
",
            field = field.name,
            points_to = field.points_to,
        ));
    }
    format!(
        "\
static void eb_visit_struct_{name}(struct {name} *p, void *target, eb_visited *visited) {{
    if (!p) return;
{body}}}
",
        name = ty.name,
        body = body,
    )
}

fn render_invalidate(roots: &[RootVar]) -> String {
    let mut body = String::new();
    for root in roots {
        body.push_str(&format!(
            "\
    if (!eb_visited_contains(&visited, (void *)&{name})) {{
        eb_visited_add(&visited, (void *)&{name});
        if ({name}.valid) {{
            if ((void *)({name}.raw) == target_raw) {{
                {name}.valid = 0;
            }} else {{
                eb_visit_struct_{points_to}({name}.raw, target_raw, &visited);
            }}
        }}
    }}
",
            name = root.name,
            points_to = root.points_to,
        ));
    }
    format!(
        "\
static void invalidate_aliases_of(void *target_raw) {{
    eb_visited visited;
    eb_visited_init(&visited);
{body}    eb_visited_free(&visited);
}}
",
        body = body,
    )
}

fn render_free_helper() -> String {
    "\
#define EB_FREE(p) \\
    do { \\
        if ((p).valid) { \\
            invalidate_aliases_of((void *)((p).raw)); \\
            free((p).raw); \\
            (p).valid = 0; \\
        } \\
    } while (0)
"
    .to_string()
}
