//! Shared fixture: a GCP organization with folders, projects, a bucket, a
//! billing account and the IAM bindings exported for it.

#![allow(dead_code)]

use accessgraph::{AccessGraph, Edge, GraphConfig, Node, NodeKind};
use tracing_subscriber::EnvFilter;

pub const ORG: &str = "1066060271767";
pub const RON: &str = "ron@test.authomize.com";
pub const DEV_MANAGER: &str = "dev-manager@striking-arbor-264209.iam.gserviceaccount.com";
pub const DEVOPS_DUDE: &str = "devops-dude-1@striking-arbor-264209.iam.gserviceaccount.com";
pub const EXERCISE_FETCHER: &str = "exercise-fetcher@striking-arbor-264209.iam.gserviceaccount.com";
pub const CLOUDASSET_SA: &str = "service-377145543109@gcp-sa-cloudasset.iam.gserviceaccount.com";
pub const REVIEWERS: &str = "reviewers@test.authomize.com";
pub const DOMAIN: &str = "test.authomize.com";
pub const BUCKET: &str = "authomize-exercise-data";
pub const BILLING: &str = "01B2E0-10D255-037E4D";

/// Number of resources below the organization
pub const ORG_DESCENDANTS: usize = 14;

/// Install a test subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn org() -> Node {
    Node::new(NodeKind::Organization, ORG)
}

pub fn folder(id: &str) -> Node {
    Node::new(NodeKind::Folder, id)
}

pub fn project(id: &str) -> Node {
    Node::new(NodeKind::Project, id)
}

pub fn user(id: &str) -> Node {
    Node::new(NodeKind::User, id)
}

pub fn service_account(id: &str) -> Node {
    Node::new(NodeKind::ServiceAccount, id)
}

pub fn group(id: &str) -> Node {
    Node::new(NodeKind::Group, id)
}

pub fn domain(id: &str) -> Node {
    Node::new(NodeKind::Domain, id)
}

pub fn bucket() -> Node {
    Node::new(NodeKind::Bucket, BUCKET)
}

pub fn billing_account() -> Node {
    Node::new(NodeKind::BillingAccount, BILLING)
}

/// Build the fixture graph with the default configuration
pub fn fixture_graph() -> AccessGraph {
    fixture_graph_with(GraphConfig::default())
}

/// Build the fixture graph with the given edge identity configuration
pub fn fixture_graph_with(config: GraphConfig) -> AccessGraph {
    init_tracing();

    let mut graph = AccessGraph::with_config(config);

    // Resources and identities, including ones without any edge
    graph.extend([
        org(),
        project("20671306372"),
        bucket(),
        billing_account(),
        user(RON),
        service_account(DEV_MANAGER),
        service_account(DEVOPS_DUDE),
        service_account(EXERCISE_FETCHER),
        service_account(CLOUDASSET_SA),
        group(REVIEWERS),
        domain(DOMAIN),
    ]);

    let hierarchy = [
        // Direct children of the organization
        (org(), folder("767216091627")),
        (org(), folder("36290848176")),
        (org(), project("185023072868")),
        (org(), project("377145543109")),
        // Children of folder 767216091627
        (folder("767216091627"), folder("188906894377")),
        (folder("767216091627"), folder("635215680011")),
        (folder("767216091627"), folder("96505015065")),
        // Children of folder 635215680011
        (folder("635215680011"), folder("518729943705")),
        (folder("635215680011"), folder("837642324986")),
        // Children of folder 96505015065
        (folder("96505015065"), folder("93198982071")),
        (folder("96505015065"), folder("361332156337")),
        // Children of folder 36290848176
        (folder("36290848176"), folder("495694787245")),
        (folder("36290848176"), project("20671306372")),
        // Bucket under project
        (project("185023072868"), bucket()),
    ];
    graph.extend(
        hierarchy
            .into_iter()
            .map(|(parent, child)| Edge::containment(parent, child)),
    );

    let fetcher = service_account(EXERCISE_FETCHER);
    let grants = [
        // Organization bindings
        (fetcher.clone(), org(), "roles/browser"),
        (fetcher.clone(), org(), "roles/cloudasset.owner"),
        (fetcher.clone(), org(), "roles/iam.securityReviewer"),
        (fetcher.clone(), org(), "roles/owner"),
        (fetcher.clone(), org(), "roles/resourcemanager.folderViewer"),
        (fetcher, org(), "roles/resourcemanager.organizationViewer"),
        (user(RON), org(), "roles/owner"),
        (user(RON), org(), "roles/resourcemanager.folderAdmin"),
        (domain(DOMAIN), org(), "roles/billing.creator"),
        (domain(DOMAIN), org(), "roles/resourcemanager.projectCreator"),
        // Folder bindings
        (service_account(DEV_MANAGER), folder("188906894377"), "roles/owner"),
        (service_account(DEVOPS_DUDE), folder("188906894377"), "roles/owner"),
        (user(RON), folder("188906894377"), "roles/resourcemanager.folderAdmin"),
        (group(REVIEWERS), folder("96505015065"), "roles/viewer"),
        // Billing account
        (user(RON), billing_account(), "roles/billing.admin"),
    ];
    graph.extend(
        grants
            .into_iter()
            .map(|(identity, resource, role)| Edge::grant(identity, resource, role)),
    );

    graph
}
