//! Built-in task schemas
//!
//! MSBuild ships a large set of tasks, each with a fixed parameter list.
//! Unknown element names inside a `Target` may be custom tasks, so the
//! validator accepts any attribute on them, but when a name matches one of
//! the tasks below the schema is closed and enforced. Every task also
//! accepts the common attributes `Condition` and `ContinueOnError`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Attributes every task accepts regardless of its own parameter list.
pub const COMMON_TASK_ATTRIBUTES: &[&str] = &["Condition", "ContinueOnError"];

/// The attribute schema of one built-in task.
#[derive(Debug, Clone, Copy)]
pub struct TaskSchema {
    /// The task's element name.
    pub name: &'static str,
    /// Parameters that must be present.
    pub required_attributes: &'static [&'static str],
    /// Parameters that may be present.
    pub optional_attributes: &'static [&'static str],
}

impl TaskSchema {
    /// Whether `name` is acceptable on this task (case-insensitive),
    /// counting the common task attributes.
    pub fn allows_attribute(&self, name: &str) -> bool {
        self.required_attributes
            .iter()
            .chain(self.optional_attributes)
            .chain(COMMON_TASK_ATTRIBUTES)
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

const fn task(
    name: &'static str,
    required_attributes: &'static [&'static str],
    optional_attributes: &'static [&'static str],
) -> TaskSchema {
    TaskSchema {
        name,
        required_attributes,
        optional_attributes,
    }
}

static BUILT_IN_TASKS: &[TaskSchema] = &[
    task(
        "AL",
        &[],
        &[
            "AlgorithmId", "BaseAddress", "CompanyName", "Configuration", "Copyright",
            "Culture", "DelaySign", "Description", "EmbedResources", "EvidenceFile",
            "ExitCode", "FileVersion", "Flags", "GenerateFullPaths", "KeyContainer",
            "KeyFile", "LinkResources", "MainEntryPoint", "OutputAssembly", "Platform",
            "ProductName", "ProductVersion", "ResponseFiles", "SdkToolsPath",
            "SourceModules", "TargetType", "TemplateFile", "Timeout", "Title", "ToolPath",
            "Trademark", "Version", "Win32Icon", "Win32Resource",
        ],
    ),
    task(
        "AspNetCompiler",
        &[],
        &[
            "AllowPartiallyTrustedCallers", "Clean", "Debug", "DelaySign", "FixedNames",
            "Force", "KeyContainer", "KeyFile", "MetabasePath", "PhysicalPath",
            "TargetFrameworkMoniker", "TargetPath", "Updateable", "VirtualPath",
        ],
    ),
    task("AssignCulture", &["Files"], &["AssignedFiles", "AssignedFilesWithCulture", "AssignedFilesWithNoCulture", "CultureNeutralAssignedFiles"]),
    task("AssignProjectConfiguration", &[], &["AddSyntheticProjectReferencesForSolutionDependencies", "AssignedProjects", "CurrentProject", "CurrentProjectConfiguration", "CurrentProjectPlatform", "DefaultToVcxPlatformMapping", "OnlyReferenceAndBuildProjectsEnabledInSolutionConfiguration", "OutputType", "ProjectReferences", "ResolveConfigurationPlatformUsingMappings", "ShouldUnsetParentConfigurationAndPlatform", "SolutionConfigurationContents", "UnassignedProjects", "VcxToDefaultPlatformMapping"]),
    task("AssignTargetPath", &[], &["AssignedFiles", "Files", "RootFolder"]),
    task("CallTarget", &[], &["RunEachTargetSeparately", "TargetOutputs", "Targets", "UseResultsCache"]),
    task("CombinePath", &["BasePath", "Paths"], &["CombinedPaths"]),
    task("ConvertToAbsolutePath", &["Paths"], &["AbsolutePaths"]),
    task(
        "Copy",
        &["SourceFiles"],
        &[
            "CopiedFiles", "DestinationFiles", "DestinationFolder", "ErrorIfLinkFails",
            "OverwriteReadOnlyFiles", "Retries", "RetryDelayMilliseconds",
            "SkipUnchangedFiles", "UseHardlinksIfPossible", "UseSymboliclinksIfPossible",
        ],
    ),
    task("CreateCSharpManifestResourceName", &["ResourceFiles"], &["ManifestResourceNames", "PrependCultureAsDirectory", "ResourceFilesWithManifestResourceNames", "RootNamespace"]),
    task("CreateItem", &[], &["AdditionalMetadata", "Exclude", "Include", "PreserveExistingMetadata"]),
    task("CreateProperty", &[], &["Value", "ValueSetByTask"]),
    task("CreateVisualBasicManifestResourceName", &["ResourceFiles"], &["ManifestResourceNames", "PrependCultureAsDirectory", "ResourceFilesWithManifestResourceNames", "RootNamespace"]),
    task(
        "Csc",
        &[],
        &[
            "AdditionalLibPaths", "AddModules", "AllowUnsafeBlocks", "ApplicationConfiguration",
            "BaseAddress", "CheckForOverflowUnderflow", "CodePage", "DebugType",
            "DefineConstants", "DelaySign", "DisabledWarnings", "DocumentationFile",
            "EmitDebugInformation", "ErrorReport", "FileAlignment", "GenerateFullPaths",
            "KeyContainer", "KeyFile", "LangVersion", "LinkResources", "MainEntryPoint",
            "ModuleAssemblyName", "NoConfig", "NoLogo", "NoStandardLib", "NoWin32Manifest",
            "Optimize", "OutputAssembly", "PdbFile", "Platform", "References", "Resources",
            "ResponseFiles", "Sources", "TargetType", "TreatWarningsAsErrors",
            "UseHostCompilerIfAvailable", "Utf8Output", "WarningLevel", "WarningsAsErrors",
            "WarningsNotAsErrors", "Win32Icon", "Win32Manifest", "Win32Resource",
        ],
    ),
    task("Delete", &["Files"], &["DeletedFiles", "TreatErrorsAsWarnings"]),
    task("DownloadFile", &["SourceUrl"], &["DestinationFileName", "DestinationFolder", "DownloadedFile", "Retries", "RetryDelayMilliseconds", "SkipUnchangedFiles", "Timeout"]),
    task("Error", &[], &["Code", "File", "HelpKeyword", "Text"]),
    task(
        "Exec",
        &["Command"],
        &[
            "ConsoleOutput", "ConsoleToMSBuild", "CustomErrorRegularExpression",
            "CustomWarningRegularExpression", "EchoOff", "EnvironmentVariables",
            "ExitCode", "IgnoreExitCode", "IgnoreStandardErrorWarningFormat", "Outputs",
            "StdErrEncoding", "StdOutEncoding", "Timeout", "ToolExe", "ToolPath",
            "WorkingDirectory",
        ],
    ),
    task("FindAppConfigFile", &["PrimaryList", "SecondaryList", "TargetPath"], &["AppConfigFile"]),
    task("FindInList", &["ItemSpecToFind", "List"], &["CaseSensitive", "FindLastMatch", "ItemFound", "MatchFileNameOnly"]),
    task("FindUnderPath", &["Path"], &["Files", "InPath", "OutOfPath", "UpdateToAbsolutePaths"]),
    task("FormatUrl", &[], &["InputUrl", "OutputUrl"]),
    task("FormatVersion", &[], &["FormatType", "OutputVersion", "Revision", "Version"]),
    task(
        "GenerateApplicationManifest",
        &[],
        &[
            "AssemblyName", "AssemblyVersion", "ClrVersion", "ConfigFile", "Dependencies",
            "Description", "EntryPoint", "ErrorReportUrl", "FileAssociations", "Files",
            "HostInBrowser", "IconFile", "InputManifest", "IsolatedComReferences",
            "ManifestType", "MaxTargetPath", "OSVersion", "OutputManifest", "Platform",
            "Product", "Publisher", "RequiresMinimumFramework35SP1", "SuiteName",
            "SupportUrl", "TargetCulture", "TargetFrameworkMoniker",
            "TargetFrameworkProfile", "TargetFrameworkSubset", "TargetFrameworkVersion",
            "TrustInfoFile", "UseApplicationTrust",
        ],
    ),
    task(
        "GenerateBootstrapper",
        &[],
        &[
            "ApplicationFile", "ApplicationName", "ApplicationRequiresElevation",
            "ApplicationUrl", "BootstrapperComponentFiles", "BootstrapperItems",
            "BootstrapperKeyFile", "ComponentsLocation", "ComponentsUrl", "CopyComponents",
            "Culture", "FallbackCulture", "OutputPath", "Path", "SupportUrl", "Validate",
        ],
    ),
    task(
        "GenerateDeploymentManifest",
        &[],
        &[
            "AssemblyName", "AssemblyVersion", "CreateDesktopShortcut", "DeploymentUrl",
            "Description", "DisallowUrlActivation", "EntryPoint", "ErrorReportUrl",
            "InputManifest", "Install", "MapFileExtensions", "MaxTargetPath",
            "MinimumRequiredVersion", "OutputManifest", "Platform", "Product", "Publisher",
            "SuiteName", "SupportUrl", "TargetCulture", "TrustUrlParameters",
            "UpdateEnabled", "UpdateInterval", "UpdateMode", "UpdateUnit",
        ],
    ),
    task(
        "GenerateResource",
        &[],
        &[
            "AdditionalInputs", "EnvironmentVariables", "ExcludedInputPaths",
            "ExecuteAsTool", "ExtractResWFiles", "FilesWritten", "MinimalRebuildFromTracking",
            "NeverLockTypeAssemblies", "OutputResources", "PublicClass", "References",
            "SdkToolsPath", "Sources", "StateFile", "StronglyTypedClassName",
            "StronglyTypedFileName", "StronglyTypedLanguage", "StronglyTypedManifestPrefix",
            "StronglyTypedNamespace", "TLogReadFiles", "TLogWriteFiles", "ToolArchitecture",
            "TrackerFrameworkPath", "TrackerLogDirectory", "TrackerSdkPath",
            "TrackFileAccess", "UseSourcePath",
        ],
    ),
    task("GenerateTrustInfo", &[], &["ApplicationDependencies", "BaseManifest", "ExcludedPermissions", "TargetFrameworkMoniker", "TargetZone", "TrustInfoFile"]),
    task("GetAssemblyIdentity", &["AssemblyFiles"], &["Assemblies"]),
    task("GetFileHash", &["Files"], &["Algorithm", "Hash", "HashEncoding", "Items", "MetadataName"]),
    task("GetFrameworkPath", &[], &["FrameworkVersion11Path", "FrameworkVersion20Path", "FrameworkVersion30Path", "FrameworkVersion35Path", "FrameworkVersion40Path", "Path"]),
    task("GetFrameworkSdkPath", &[], &["FrameworkSdkVersion20Path", "FrameworkSdkVersion35Path", "FrameworkSdkVersion40Path", "Path"]),
    task("GetReferenceAssemblyPaths", &[], &["BypassFrameworkInstallChecks", "FullFrameworkReferenceAssemblyPaths", "ReferenceAssemblyPaths", "RootPath", "TargetFrameworkFallbackSearchPaths", "TargetFrameworkMoniker", "TargetFrameworkMonikerDisplayName"]),
    task("Hash", &["ItemsToHash"], &["HashResult", "IgnoreCase"]),
    task("LC", &["Sources"], &["LicenseTarget", "NoLogo", "OutputDirectory", "OutputLicense", "ReferencedAssemblies", "SdkToolsPath", "ToolPath"]),
    task("MakeDir", &["Directories"], &["DirectoriesCreated"]),
    task("Message", &[], &["Code", "File", "HelpKeyword", "Importance", "IsCritical", "Text"]),
    task("Move", &["SourceFiles"], &["DestinationFiles", "DestinationFolder", "MovedFiles", "OverwriteReadOnlyFiles"]),
    task(
        "MSBuild",
        &["Projects"],
        &[
            "BuildInParallel", "Properties", "RebaseOutputs", "RemoveProperties",
            "RunEachTargetSeparately", "SkipNonexistentProjects", "StopOnFirstFailure",
            "TargetAndPropertyListSeparators", "TargetOutputs", "Targets", "ToolsVersion",
            "UnloadProjectsOnCompletion", "UseResultsCache",
        ],
    ),
    task("ReadLinesFromFile", &["File"], &["Lines"]),
    task("RegisterAssembly", &["Assemblies"], &["AssemblyListFile", "CreateCodeBase", "TypeLibFiles"]),
    task("RemoveDir", &["Directories"], &["RemovedDirectories"]),
    task("RemoveDuplicates", &[], &["Filtered", "HadAnyDuplicates", "Inputs"]),
    task("RequiresFramework35SP1Assembly", &[], &["Assemblies", "CreateDesktopShortcut", "DeploymentManifestEntryPoint", "EntryPoint", "ErrorReportUrl", "Files", "ReferencedAssemblies", "RequiresMinimumFramework35SP1", "SigningManifests", "SuiteName", "TargetFrameworkVersion"]),
    task(
        "ResolveAssemblyReference",
        &["Assemblies"],
        &[
            "AllowedAssemblyExtensions", "AllowedRelatedFileExtensions", "AppConfigFile",
            "AssemblyFiles", "AutoUnify", "CandidateAssemblyFiles", "CopyLocalDependenciesWhenParentReferenceInGac",
            "CopyLocalFiles", "DependsOnNETStandard", "DependsOnSystemRuntime",
            "FilesWritten", "FindDependencies", "FindDependenciesOfExternallyResolvedReferences",
            "FindRelatedFiles", "FindSatellites", "FindSerializationAssemblies",
            "FullFrameworkAssemblyTables", "FullFrameworkFolders", "FullTargetFrameworkSubsetNames",
            "IgnoreDefaultInstalledAssemblySubsetTables", "IgnoreDefaultInstalledAssemblyTables",
            "IgnoreTargetFrameworkAttributeVersionMismatch", "IgnoreVersionForFrameworkReferences",
            "InstalledAssemblySubsetTables", "InstalledAssemblyTables", "LatestTargetFrameworkDirectories",
            "ProfileName", "RelatedFiles", "ResolvedDependencyFiles", "ResolvedFiles",
            "SatelliteFiles", "ScatterFiles", "SearchPaths", "SerializationAssemblyFiles",
            "Silent", "StateFile", "SuggestedRedirects", "SupportsBindingRedirectGeneration",
            "TargetedRuntimeVersion", "TargetFrameworkDirectories", "TargetFrameworkMoniker",
            "TargetFrameworkMonikerDisplayName", "TargetFrameworkSubsets", "TargetFrameworkVersion",
            "TargetProcessorArchitecture", "UnresolveFrameworkAssembliesFromHigherFrameworks",
            "WarnOrErrorOnTargetArchitectureMismatch",
        ],
    ),
    task(
        "ResolveComReference",
        &[],
        &[
            "DelaySign", "EnvironmentVariables", "ExecuteAsTool", "IncludeVersionInInteropName",
            "KeyContainer", "KeyFile", "NoClassMembers", "ResolvedAssemblyReferences",
            "ResolvedFiles", "ResolvedModules", "SdkToolsPath", "StateFile", "TargetFrameworkVersion",
            "TargetProcessorArchitecture", "TypeLibFiles", "TypeLibNames", "WrapperOutputDirectory",
        ],
    ),
    task("ResolveKeySource", &[], &["AutoClosePasswordPromptShow", "AutoClosePasswordPromptTimeout", "CertificateFile", "CertificateThumbprint", "KeyFile", "ResolvedKeyContainer", "ResolvedKeyFile", "ResolvedThumbprint", "ShowImportDialogDespitePreviousFailures", "SuppressAutoClosePasswordPrompt"]),
    task(
        "ResolveManifestFiles",
        &[],
        &[
            "DeploymentManifestEntryPoint", "EntryPoint", "ExtraFiles", "ManagedAssemblies",
            "NativeAssemblies", "OutputAssemblies", "OutputDeploymentManifestEntryPoint",
            "OutputEntryPoint", "OutputFiles", "PublishFiles", "SatelliteAssemblies",
            "SigningManifests", "TargetCulture", "TargetFrameworkVersion",
        ],
    ),
    task("ResolveNativeReference", &["AdditionalSearchPaths", "NativeReferences"], &["ContainedComComponents", "ContainedLooseEtcFiles", "ContainedLooseTlbFiles", "ContainedPrerequisiteAssemblies", "ContainedTypeLibraries", "ContainingReferenceFiles"]),
    task("ResolveNonMSBuildProjectOutput", &["ProjectReferences"], &["PreresolvedProjectOutputs", "ResolvedOutputPaths", "UnresolvedProjectReferences"]),
    task(
        "SGen",
        &["BuildAssemblyName", "BuildAssemblyPath", "ShouldGenerateSerializer", "UseProxyTypes"],
        &[
            "DelaySign", "KeyContainer", "KeyFile", "Platform", "References",
            "SdkToolsPath", "SerializationAssembly", "SerializationAssemblyName",
            "Timeout", "ToolPath", "Types", "UseKeep",
        ],
    ),
    task("SignFile", &["CertificateThumbprint", "SigningTarget"], &["SigningTargetPath", "TargetFrameworkVersion", "TimestampUrl"]),
    task("Touch", &["Files"], &["AlwaysCreate", "ForceTouch", "Time", "TouchedFiles"]),
    task("UnregisterAssembly", &[], &["Assemblies", "AssemblyListFile", "TypeLibFiles"]),
    task("Unzip", &["DestinationFolder", "SourceFiles"], &["Include", "Exclude", "OverwriteReadOnlyFiles", "SkipUnchangedFiles"]),
    task("UpdateManifest", &["ApplicationManifest", "ApplicationPath", "InputManifest"], &["OutputManifest"]),
    task(
        "Vbc",
        &[],
        &[
            "AdditionalLibPaths", "AddModules", "BaseAddress", "CodePage", "DebugType",
            "DefineConstants", "DelaySign", "DisabledWarnings", "DocumentationFile",
            "EmitDebugInformation", "ErrorReport", "FileAlignment", "GenerateDocumentation",
            "Imports", "KeyContainer", "KeyFile", "LangVersion", "LinkResources",
            "MainEntryPoint", "ModuleAssemblyName", "NoConfig", "NoLogo", "NoStandardLib",
            "NoVBRuntimeReference", "NoWarnings", "Optimize", "OptionCompare",
            "OptionExplicit", "OptionInfer", "OptionStrict", "OptionStrictType",
            "OutputAssembly", "Platform", "References", "RemoveIntegerChecks", "Resources",
            "ResponseFiles", "RootNamespace", "SdkPath", "Sources", "TargetCompactFramework",
            "TargetType", "TreatWarningsAsErrors", "UseHostCompilerIfAvailable",
            "Utf8Output", "Verbosity", "WarningsAsErrors", "WarningsNotAsErrors",
            "Win32Icon", "Win32Resource",
        ],
    ),
    task("VerifyFileHash", &["File", "Hash"], &["Algorithm", "HashEncoding"]),
    task("Warning", &[], &["Code", "File", "HelpKeyword", "Text"]),
    task("WriteCodeFragment", &["Language"], &["AssemblyAttributes", "OutputDirectory", "OutputFile"]),
    task("WriteLinesToFile", &["File"], &["Encoding", "Lines", "Overwrite", "WriteOnlyWhenDifferent"]),
    task("XmlPeek", &[], &["Namespaces", "ProhibitDtd", "Query", "Result", "XmlContent", "XmlInputPath"]),
    task("XmlPoke", &[], &["Namespaces", "Query", "Value", "XmlInputPath"]),
    task(
        "XslTransformation",
        &["OutputPaths"],
        &[
            "Parameters", "XmlContent", "XmlInputPaths", "XslCompiledDllPath",
            "XslContent", "XslInputPath",
        ],
    ),
    task("ZipDirectory", &["DestinationFile", "SourceDirectory"], &["Overwrite"]),
    // Visual C++ and setup-authoring tasks commonly seen in project files.
    task("BscMake", &[], &["AdditionalOptions", "OutputFile", "PreserveSbr", "Sources", "SuppressStartupBanner", "TrackerLogDirectory"]),
    task("CL", &["Sources"], &["AdditionalIncludeDirectories", "AdditionalOptions", "AdditionalUsingDirectories", "AssemblerListingLocation", "AssemblerOutput", "BasicRuntimeChecks", "BrowseInformation", "BufferSecurityCheck", "CallingConvention", "CompileAs", "DebugInformationFormat", "DisableSpecificWarnings", "EnableEnhancedInstructionSet", "ExceptionHandling", "FavorSizeOrSpeed", "ForcedIncludeFiles", "FunctionLevelLinking", "InlineFunctionExpansion", "IntrinsicFunctions", "MinimalRebuild", "ObjectFileName", "Optimization", "PrecompiledHeader", "PrecompiledHeaderFile", "PrecompiledHeaderOutputFile", "PreprocessorDefinitions", "ProgramDataBaseFileName", "RuntimeLibrary", "RuntimeTypeInfo", "TreatWarningAsError", "UsePrecompiledHeader", "WarningLevel", "WholeProgramOptimization"]),
    task("Lib", &[], &["AdditionalDependencies", "AdditionalLibraryDirectories", "AdditionalOptions", "ExportNamedFunctions", "IgnoreAllDefaultLibraries", "IgnoreSpecificDefaultLibraries", "ModuleDefinitionFile", "OutputFile", "Sources", "SuppressStartupBanner", "TargetMachine"]),
    task("Link", &["Sources"], &["AdditionalDependencies", "AdditionalLibraryDirectories", "AdditionalOptions", "DataExecutionPrevention", "EnableCOMDATFolding", "EnableUAC", "EntryPointSymbol", "GenerateDebugInformation", "GenerateMapFile", "IgnoreAllDefaultLibraries", "IgnoreSpecificDefaultLibraries", "ImportLibrary", "LinkIncremental", "LinkTimeCodeGeneration", "MapFileName", "ModuleDefinitionFile", "OptimizeReferences", "OutputFile", "ProgramDatabaseFile", "RandomizedBaseAddress", "SubSystem", "TargetMachine", "UACExecutionLevel"]),
    task("MIDL", &["Source"], &["AdditionalIncludeDirectories", "AdditionalOptions", "DllDataFileName", "HeaderFileName", "InterfaceIdentifierFileName", "MkTypLibCompatible", "OutputDirectory", "PreprocessorDefinitions", "ProxyFileName", "TargetEnvironment", "TypeLibraryName", "WarningLevel"]),
    task("RC", &["Source"], &["AdditionalIncludeDirectories", "AdditionalOptions", "Culture", "IgnoreStandardIncludePath", "PreprocessorDefinitions", "ResourceOutputFileName", "ShowProgress", "SuppressStartupBanner"]),
    task("AxImp", &["ActiveXControls"], &["DelaySign", "GenerateSource", "KeyContainer", "KeyFile", "NoLogo", "OutputAssembly", "RuntimeCallableWrapperAssembly", "SdkToolsPath", "Silent", "ToolPath", "Verbose"]),
    task("TlbImp", &["TypeLibName"], &["AssemblyNamespace", "AssemblyVersion", "DelaySign", "KeyContainer", "KeyFile", "Machine", "NoLogo", "OutputAssembly", "PreventClassMembers", "ReferenceFiles", "SafeArrayAsSystemArray", "SdkToolsPath", "Silent", "SuppressStartupBanner", "ToolPath", "Transform", "TypeLibNames", "Verbose"]),
    task("WinMDExp", &["WinMDModule"], &["AssemblyUnificationPolicy", "DisabledWarnings", "InputDocumentationFile", "InputPDBFile", "NoWarn", "OutputDocumentationFile", "OutputPDBFile", "OutputWindowsMetadataFile", "References", "SdkToolsPath", "TreatWarningsAsErrors", "UTF8Output"]),
    task("SetEnv", &["Name"], &["OutputEnvironmentVariable", "Prefix", "Target", "Value"]),
    task("GetOutOfDateItems", &["CommandMetadata", "Sources", "TLogDirectory", "TLogNamePrefix"], &["CheckForInterdependencies", "OutOfDateSources"]),
    // Tasks from common extension packs that ship fixed schemas.
    task("Telemetry", &["EventName"], &["EventData"]),
    task("XdcMake", &[], &["AdditionalDocumentFile", "AdditionalOptions", "DocumentLibraryDependencies", "OutputFile", "ProjectName", "Sources", "SuppressStartupBanner"]),
    task("XmlPreprocess", &["InputFile"], &["OutputFile", "SettingsFile", "SettingsValues"]),
    task("GenAPI", &["Assemblies"], &["ApiList", "ExcludeApiList", "ExcludeAttributesList", "HeaderFile", "LibPath", "OutputPath"]),
    task("GenerateManifests", &[], &["ApplicationManifest", "DeploymentManifest", "EntryPoint", "InputManifest", "TargetFrameworkMoniker", "TargetFrameworkVersion"]),
    task("GenerateLauncher", &["EntryPoint"], &["AssemblyName", "OutputPath", "VisualStudioVersion"]),
    task("CleanupPublishFolder", &["PublishDir"], &["PublishLanguage"]),
    task("CollectFilesToPublish", &[], &["FilesToPublish", "PublishProtocol"]),
    task("CheckForDuplicateItems", &["ItemSpecsToCheck", "ItemName", "PropertyNameToDisable"], &["DeduplicatedItems", "DefaultItemsEnabled", "DefaultItemsOfThisTypeEnabled"]),
    task("GenerateDepsFile", &["AssetsFilePath", "DepsFilePath", "RuntimeIdentifier", "TargetFramework"], &["CompilerOptions", "CompileReferences", "IncludeMainProject", "ResolvedNuGetFiles", "ResolvedRuntimeTargetsFiles", "RuntimeFrameworks", "UserRuntimeAssemblies", "ValidRuntimeIdentifierPlatformsForAssets"]),
    task("GenerateRuntimeConfigurationFiles", &["RuntimeConfigPath", "TargetFrameworkMoniker"], &["AdditionalProbingPaths", "AssetsFilePath", "HostConfigurationOptions", "IsSelfContained", "RollForward", "RuntimeConfigDevPath", "RuntimeFrameworks", "UserRuntimeConfig", "WriteAdditionalProbingPathsToMainConfig"]),
    task("ResolvePackageAssets", &["ProjectAssetsFile", "TargetFramework"], &["CompileTimeAssemblies", "ContentFilesToPreprocess", "NativeLibraries", "PackageFolders", "ResourceAssemblies", "RuntimeAssemblies", "RuntimeIdentifier", "RuntimeTargets", "SatelliteResources", "TransitiveProjectReferences"]),
    task("ResolveTargetingPackAssets", &[], &["FrameworkReferences", "GeneratePlatformPackageConflicts", "ReferencesToAdd", "ResolvedTargetingPacks", "RuntimeFrameworks", "TargetingPackRoot"]),
    task("ProcessFrameworkReferences", &[], &["EnableTargetingPackDownload", "FrameworkReferences", "KnownFrameworkReferences", "KnownRuntimePacks", "PackagesToDownload", "RuntimeFrameworks", "RuntimeGraphPath", "RuntimeIdentifier", "SelfContained", "TargetFrameworkIdentifier", "TargetFrameworkVersion", "TargetingPacks"]),
];

/// Index from lowercase task name to its schema, built on first use.
static BUILT_IN_TASK_INDEX: Lazy<IndexMap<String, &'static TaskSchema>> = Lazy::new(|| {
    BUILT_IN_TASKS
        .iter()
        .map(|schema| (schema.name.to_ascii_lowercase(), schema))
        .collect()
});

/// The built-in task schema for `name`, matched case-insensitively.
pub fn built_in_task(name: &str) -> Option<&'static TaskSchema> {
    BUILT_IN_TASK_INDEX.get(&name.to_ascii_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(built_in_task("Copy").is_some());
        assert!(built_in_task("copy").is_some());
        assert!(built_in_task("COPY").is_some());
    }

    #[test]
    fn test_unknown_task_has_no_schema() {
        assert!(built_in_task("MyCustomTask").is_none());
    }

    #[test]
    fn test_common_attributes_always_allowed() {
        let copy = built_in_task("Copy").unwrap();
        assert!(copy.allows_attribute("Condition"));
        assert!(copy.allows_attribute("ContinueOnError"));
        assert!(copy.allows_attribute("SourceFiles"));
        assert!(copy.allows_attribute("DestinationFolder"));
        assert!(!copy.allows_attribute("Frobnicate"));
    }

    #[test]
    fn test_required_attributes() {
        assert_eq!(built_in_task("Exec").unwrap().required_attributes, &["Command"]);
        assert_eq!(built_in_task("MakeDir").unwrap().required_attributes, &["Directories"]);
        assert!(built_in_task("Message").unwrap().required_attributes.is_empty());
    }

    #[test]
    fn test_index_has_no_duplicate_names() {
        assert_eq!(BUILT_IN_TASK_INDEX.len(), BUILT_IN_TASKS.len());
    }
}
