crate::define_id_enum! {
    /// JVM build tool family
    BuildSystemId {
        Maven => "maven" : "Maven" | "maven" | "mvn",
        Gradle => "gradle" : "Gradle" | "gradle",
        Ant => "ant" : "Ant" | "ant",
        Sbt => "sbt" : "sbt" | "SBT",
    }
}
